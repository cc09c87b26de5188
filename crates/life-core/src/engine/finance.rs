//! Finance Handlers
//!
//! Daily living costs and poverty penalties, the monthly boundary cycle
//! (bills, interest, recurring care costs, paycheck), investment market
//! drift, and the employment-continuity check.

use crate::config::FinanceTuning;
use crate::output::NarrativeLog;
use crate::rng::RandomStream;
use crate::state::StateRecord;

/// Draw today's living cost. The agent spends less when money is tight.
pub fn roll_daily_cost(state: &StateRecord, tuning: &FinanceTuning, rng: &mut RandomStream) -> f64 {
    if state.money >= tuning.lean_threshold {
        rng.uniform_f64(tuning.daily_cost_min, tuning.daily_cost_max)
    } else {
        rng.uniform_f64(tuning.lean_daily_cost_min, tuning.lean_daily_cost_max)
    }
}

/// Deduct a daily living cost and apply poverty penalties.
///
/// Two tiers: below the mild threshold, and overdrawn. When the balance goes
/// negative, the overdraft is swept into `debt` and money resets to exactly
/// zero. The tiers are mutually exclusive unless `poverty_tiers_stack` is
/// set: on a severe day only the severe penalties apply.
pub fn apply_daily_cost(
    state: &mut StateRecord,
    tuning: &FinanceTuning,
    cost: f64,
    log: &mut NarrativeLog,
) {
    state.money -= cost;

    let overdrawn = state.money < 0.0;
    if overdrawn {
        let overflow = -state.money;
        state.debt += overflow;
        state.money = 0.0;
        state.health -= tuning.poverty_severe_health;
        state.happiness -= tuning.poverty_severe_happiness;
        log.push(state.day, format!("Overdrawn: ${overflow:.2} added to debt"));
        if tuning.poverty_tiers_stack {
            state.health -= tuning.poverty_mild_health;
            state.happiness -= tuning.poverty_mild_happiness;
        }
    } else if state.money < tuning.poverty_mild_threshold {
        state.health -= tuning.poverty_mild_health;
        state.happiness -= tuning.poverty_mild_happiness;
    }
}

/// The `day % 30 == 1` boundary: bills, interest, recurring costs, paycheck,
/// retirement growth, and credit-score drift.
pub fn monthly_cycle(state: &mut StateRecord, tuning: &FinanceTuning, log: &mut NarrativeLog) {
    let months_elapsed = (state.day / 30) as f64;
    let inflation = 1.0 + tuning.monthly_inflation_rate * months_elapsed;

    // Housing and fixed bills
    let housing = if state.owns_home {
        state.mortgage_payment
    } else {
        tuning.monthly_rent
    };
    state.money -= (tuning.monthly_bills + housing) * inflation;

    // Consumer debt accrues and the agent auto-pays what it can of the
    // interest, so untouched debt still compounds.
    let mut on_time = true;
    if state.debt > 0.0 {
        let interest = state.debt * tuning.debt_interest_rate;
        state.debt += interest;
        let payment = interest.min(state.money.max(0.0));
        state.money -= payment;
        state.debt -= payment;
        on_time = payment >= interest;
        state.happiness -= if state.debt > 5000.0 { 8.0 } else { 3.0 };
    }

    if state.student_loan_debt > 0.0 {
        state.student_loan_debt *= 1.0 + tuning.student_loan_interest_rate;
        let payment = tuning
            .student_loan_min_payment
            .min(state.student_loan_debt)
            .min(state.money.max(0.0));
        state.money -= payment;
        state.student_loan_debt -= payment;
        if payment < tuning.student_loan_min_payment.min(state.student_loan_debt) {
            on_time = false;
        }
        if state.student_loan_debt <= 0.0 {
            state.student_loan_debt = 0.0;
            state.life_goals_completed += 1;
            log.push(state.day, "Paid off student loans");
        }
    }

    // Recurring care costs
    if state.has_health_insurance {
        state.money -= tuning.insurance_premium;
    }
    if state.in_therapy {
        state.money -= tuning.therapy_cost;
        state.mental_health += 6.0;
        state.stress -= 8.0;
    }
    if state.on_medication {
        state.money -= tuning.medication_cost;
    }
    if state.gym_membership {
        state.money -= tuning.gym_cost;
    }

    // Paycheck: gross scaled by stability and skill, taxed flat, with an
    // employer retirement match on gross.
    if state.has_job {
        let skill_multiplier = 1.0 + (state.skill_level as f64 - 1.0) * 0.3;
        let gross = state.monthly_income * (state.job_stability as f64 / 100.0) * skill_multiplier;
        let net = gross * (1.0 - tuning.income_tax_rate);
        state.money += net;
        state.retirement_savings += gross * tuning.retirement_match_rate;
        log.push(state.day, format!("Paycheck +${net:.0}"));
    }

    state.retirement_savings *= 1.0 + tuning.retirement_growth_rate;

    // Credit drifts with payment behavior and overall debt load.
    if !on_time {
        state.credit_score -= 15;
    } else if state.debt == 0.0 {
        state.credit_score += 3;
    } else if state.debt > 10_000.0 {
        state.credit_score -= 5;
    } else {
        state.credit_score += 1;
    }

}

/// Daily drift of the investment balance.
pub fn market_fluctuation(state: &mut StateRecord, tuning: &FinanceTuning, rng: &mut RandomStream) {
    if state.investments > 0.0 {
        let drift = rng.uniform_f64(tuning.market_drift_min, tuning.market_drift_max);
        state.investments *= 1.0 + drift;
    }
}

/// Job-loss continuity check: shaky jobs are lost at a higher daily rate.
pub fn employment_continuity(
    state: &mut StateRecord,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    if !state.has_job {
        return;
    }
    let instability = 1.0 - state.job_stability / 100.0;
    let p = 0.0005 + instability * 0.004;
    if rng.chance(p) {
        state.has_job = false;
        state.monthly_income = 0.0;
        state.job_stability = 0.0;
        state.happiness -= 20.0;
        state.stress += 15.0;
        log.push(state.day, "Laid off");
    }
}
