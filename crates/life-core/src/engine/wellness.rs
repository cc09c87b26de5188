//! Illness and Substance Handlers
//!
//! Day-by-day progression of acute illness, chronic conditions, and
//! substance dependencies. Ordered after the decision phase and before the
//! random-event draw.

use crate::config::{IllnessTuning, SubstanceTuning};
use crate::output::NarrativeLog;
use crate::rng::RandomStream;
use crate::state::{ChronicCondition, Personality, StateRecord};

/// Progress an active illness by one day and resolve recovery.
pub fn illness_progression(
    state: &mut StateRecord,
    tuning: &IllnessTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    if state.sick {
        state.sick_days_remaining -= 1;
        state.health -= state.sickness_severity * 1.5;
        state.energy -= 35.0;
        state.happiness -= 12.0;

        // Insured care can shorten the illness sharply.
        if state.has_health_insurance && rng.chance(tuning.insured_care_chance) {
            state.health += 20.0;
            state.sick_days_remaining = (state.sick_days_remaining - 3).max(0);
        }

        if state.sick_days_remaining <= 0 {
            state.sick = false;
            state.sickness_severity = 0.0;
            log.push(state.day, "Recovered from illness");
        }
    }

    // Chronic conditions flare independently of acute illness.
    for condition in state.chronic_conditions.clone() {
        if rng.chance(tuning.chronic_flare_chance) {
            apply_flare(state, condition);
            log.push(state.day, format!("Chronic flare-up: {condition:?}"));
        }
    }

    // Sustained poor health can seed a chronic condition.
    if state.health < 25.0
        && state.chronic_conditions.len() < 3
        && rng.chance(0.01)
    {
        let candidates = [
            ChronicCondition::Hypertension,
            ChronicCondition::BackPain,
            ChronicCondition::Diabetes,
        ];
        let picked = *rng.uniform_choice(&candidates);
        if !state.chronic_conditions.contains(&picked) {
            state.chronic_conditions.push(picked);
            log.push(state.day, format!("Diagnosed with {picked:?}"));
        }
    }
}

fn apply_flare(state: &mut StateRecord, condition: ChronicCondition) {
    match condition {
        ChronicCondition::Hypertension | ChronicCondition::Diabetes => {
            state.health -= 2.0;
            state.energy -= 10.0;
        }
        ChronicCondition::Asthma => {
            state.health -= 1.0;
            state.energy -= 15.0;
        }
        ChronicCondition::BackPain => {
            state.energy -= 12.0;
            state.happiness -= 4.0;
        }
        ChronicCondition::Anxiety | ChronicCondition::Depression => {
            state.mental_health -= 3.0;
            state.stress += 6.0;
        }
    }
    // Medication blunts the worst of a flare.
    if state.on_medication {
        state.health += 1.0;
        state.mental_health += 1.5;
    }
}

/// Substance dependency progression and stress-coping triggers.
pub fn substance_progression(
    state: &mut StateRecord,
    tuning: &SubstanceTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    if state.in_recovery {
        state.alcohol_dependency -= tuning.recovery_step;
        state.drug_dependency -= tuning.recovery_step;
        if state.alcohol_dependency <= 0.0 && state.drug_dependency <= 0.0 {
            state.in_recovery = false;
            state.life_goals_completed += 1;
            log.push(state.day, "Completed recovery program");
        }
        return;
    }

    // High stress makes reaching for a substance more likely; impulsive
    // temperaments more so.
    if state.stress > tuning.coping_stress_threshold {
        let mut p = tuning.coping_chance;
        if state.personality == Personality::Impulsive {
            p *= 1.8;
        }
        if rng.chance(p) {
            if state.drug_dependency > 30.0 || rng.chance(0.15) {
                state.drug_dependency += tuning.drug_step;
            } else {
                state.alcohol_dependency += tuning.alcohol_step;
            }
            state.stress -= 8.0;
            state.happiness += 3.0;
            state.health -= 0.4;
            log.push(state.day, "Coped with stress through substances");
        }
    }

    // Established dependencies pull on health and mental health daily.
    if state.alcohol_dependency > 20.0 {
        state.health -= state.alcohol_dependency * 0.004;
        state.mental_health -= state.alcohol_dependency * 0.003;
    }
    if state.drug_dependency > 20.0 {
        state.health -= state.drug_dependency * 0.008;
        state.mental_health -= state.drug_dependency * 0.006;
        state.money -= state.drug_dependency as f64 * 0.5;
    }

    if state.smoking {
        state.health -= tuning.smoking_health_cost * (1.0 + state.smoking_intensity / 50.0);
    }
}
