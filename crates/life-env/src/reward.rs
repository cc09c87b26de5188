//! Reward Model
//!
//! Scalar per-step reward computed from the post-step state. Terminal steps
//! short-circuit to a flat penalty; living steps combine a survival bonus,
//! centered vitals terms, capped wealth terms, and social bonuses minus
//! substance and legal penalties.

use life_core::state::{RelationshipStatus, StateRecord};

/// Reward emitted on the step where the agent dies.
pub const TERMINAL_PENALTY: f32 = -100.0;

/// Flat bonus for being alive at the end of the step.
const SURVIVAL_BONUS: f32 = 0.5;

const HEALTH_WEIGHT: f32 = 1.0;
const MENTAL_WEIGHT: f32 = 1.0;
const HAPPINESS_WEIGHT: f32 = 1.5;
const ENERGY_WEIGHT: f32 = 0.3;
const STRESS_WEIGHT: f32 = 0.5;

fn centered(value: f32) -> f32 {
    (value - 50.0) / 50.0
}

/// Compute the reward for the state reached after a step.
pub fn compute(state: &StateRecord) -> f32 {
    if !state.alive {
        return TERMINAL_PENALTY;
    }

    let mut reward = SURVIVAL_BONUS;

    reward += HEALTH_WEIGHT * centered(state.health);
    reward += MENTAL_WEIGHT * centered(state.mental_health);
    reward += HAPPINESS_WEIGHT * centered(state.happiness);
    reward += ENERGY_WEIGHT * centered(state.energy);
    reward -= STRESS_WEIGHT * centered(state.stress);

    // Wealth terms saturate so money never dominates the vitals
    reward += (state.money / 10_000.0).min(2.0) as f32;
    reward -= (state.debt / 5_000.0).min(2.0) as f32;

    match state.relationship_status {
        RelationshipStatus::Married => reward += 0.5,
        RelationshipStatus::Dating => reward += 0.2,
        RelationshipStatus::Single => {}
    }
    reward += 0.3 * state.living_children().min(3) as f32;
    reward += 0.2 * state.life_goals_completed.min(5) as f32;
    reward += 0.2 * centered(state.reputation);

    reward -= 0.01 * state.alcohol_dependency;
    reward -= 0.015 * state.drug_dependency;
    reward -= 0.3 * state.criminal_record.len().min(5) as f32;
    if state.in_jail {
        reward -= 2.0;
    }

    if state.has_job {
        reward += 0.3 * state.job_satisfaction / 100.0;
    }

    reward
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::RandomStream;

    fn fresh() -> StateRecord {
        let mut rng = RandomStream::seeded(3);
        StateRecord::generate(&mut rng)
    }

    #[test]
    fn test_terminal_penalty_short_circuits() {
        let mut state = fresh();
        state.money = 1_000_000.0;
        state.happiness = 100.0;
        state.alive = false;
        assert_eq!(compute(&state), TERMINAL_PENALTY);
    }

    #[test]
    fn test_thriving_beats_struggling() {
        let mut good = fresh();
        good.health = 95.0;
        good.mental_health = 90.0;
        good.happiness = 85.0;
        good.stress = 15.0;
        good.money = 20_000.0;
        good.debt = 0.0;

        let mut bad = fresh();
        bad.health = 25.0;
        bad.mental_health = 20.0;
        bad.happiness = 10.0;
        bad.stress = 90.0;
        bad.money = 0.0;
        bad.debt = 15_000.0;

        assert!(compute(&good) > compute(&bad));
    }

    #[test]
    fn test_wealth_term_is_capped() {
        let mut a = fresh();
        a.money = 20_000.0;
        let mut b = a.clone();
        b.money = 20_000_000.0;
        assert_eq!(compute(&a), compute(&b));
    }

    #[test]
    fn test_jail_is_penalized() {
        let free = fresh();
        let mut jailed = free.clone();
        jailed.in_jail = true;
        assert!(compute(&jailed) < compute(&free));
    }

    #[test]
    fn test_job_satisfaction_counts_only_when_employed() {
        let mut a = fresh();
        a.has_job = false;
        a.monthly_income = 0.0;
        a.job_satisfaction = 100.0;
        let mut b = a.clone();
        b.job_satisfaction = 0.0;
        assert_eq!(compute(&a), compute(&b));
    }
}
