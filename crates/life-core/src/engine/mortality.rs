//! Terminal Condition Checks
//!
//! Death conditions evaluated in a fixed priority order: an organ-failure
//! collapse check at the start of each day, then the full sequence at the
//! end. The first matching condition wins, sets `alive = false` exactly
//! once, and records the cause. The order is part of the observable
//! contract.

use crate::config::MortalityTuning;
use crate::output::NarrativeLog;
use crate::rng::RandomStream;
use crate::state::{CauseOfEnd, StateRecord, TransportMode};

/// Update the low-happiness streak counter. Runs before the death checks.
pub fn update_streaks(state: &mut StateRecord, tuning: &MortalityTuning) {
    if state.happiness < tuning.despair_happiness_threshold {
        state.low_happiness_streak += 1;
    } else {
        state.low_happiness_streak = 0;
    }
}

/// Full death-check sequence for an active day. Returns true if the agent
/// died this step.
pub fn run_death_checks(
    state: &mut StateRecord,
    tuning: &MortalityTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) -> bool {
    if !state.alive {
        return true;
    }

    if state.health <= 0.0 {
        return die(state, CauseOfEnd::HealthFailure, log);
    }

    if state.mental_health <= 0.0 {
        return die(state, CauseOfEnd::MentalHealthCrisis, log);
    }

    if state.low_happiness_streak > tuning.despair_streak_days
        && rng.chance(tuning.despair_death_chance)
    {
        return die(state, CauseOfEnd::GaveUp, log);
    }

    let bmi = state.bmi();
    if bmi < tuning.bmi_min || bmi > tuning.bmi_max {
        return die(state, CauseOfEnd::WeightRelated, log);
    }

    let dependency = state.alcohol_dependency.max(state.drug_dependency);
    if dependency > tuning.overdose_threshold && rng.chance(tuning.overdose_chance) {
        return die(state, CauseOfEnd::Overdose, log);
    }

    if state.age > tuning.old_age_start && rng.chance(tuning.old_age_chance) {
        return die(state, CauseOfEnd::OldAge, log);
    }

    // Residual accident/violence risk: one draw against an accumulated rate.
    let mut risk = tuning.base_accident_risk;
    if state.transport_today == TransportMode::Walked {
        risk += tuning.risky_transport_accident_risk;
    }
    if state.money < tuning.deep_poverty_threshold {
        risk += tuning.deep_poverty_accident_risk;
    }
    if rng.chance(risk) {
        let cause = sudden_cause(state, rng);
        return die(state, cause, log);
    }

    false
}

/// Immediate organ-failure check. A state entering a day at or below a zero
/// vital dies on that step, before any daily recovery can pull it back up.
/// Same priority order as the full sequence: health first.
pub fn vital_collapse_check(state: &mut StateRecord, log: &mut NarrativeLog) -> bool {
    if !state.alive {
        return true;
    }
    if state.health <= 0.0 {
        return die(state, CauseOfEnd::HealthFailure, log);
    }
    if state.mental_health <= 0.0 {
        return die(state, CauseOfEnd::MentalHealthCrisis, log);
    }
    false
}

/// Abbreviated checks while jailed: only organ-failure conditions apply.
pub fn run_jailed_death_checks(state: &mut StateRecord, log: &mut NarrativeLog) -> bool {
    vital_collapse_check(state, log)
}

fn sudden_cause(state: &StateRecord, rng: &mut RandomStream) -> CauseOfEnd {
    let causes: &[CauseOfEnd] = match state.transport_today {
        TransportMode::Walked => &[
            CauseOfEnd::HitByVehicle,
            CauseOfEnd::ViolentCrime,
            CauseOfEnd::HealthComplication,
        ],
        TransportMode::OwnCar | TransportMode::Rideshare | TransportMode::FriendRide => &[
            CauseOfEnd::CarAccident,
            CauseOfEnd::ViolentCrime,
            CauseOfEnd::HealthComplication,
        ],
        _ => &[CauseOfEnd::ViolentCrime, CauseOfEnd::HealthComplication],
    };
    *rng.uniform_choice(causes)
}

fn die(state: &mut StateRecord, cause: CauseOfEnd, log: &mut NarrativeLog) -> bool {
    state.terminate(cause);
    log.push(state.day, format!("Died: {}", cause.as_str()));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;

    fn setup() -> (StateRecord, MortalityTuning, RandomStream, NarrativeLog) {
        let mut rng = RandomStream::seeded(11);
        let state = StateRecord::generate(&mut rng);
        (state, Tuning::default().mortality, rng, NarrativeLog::new())
    }

    #[test]
    fn test_health_failure_has_top_priority() {
        let (mut state, tuning, mut rng, mut log) = setup();
        state.health = 0.0;
        state.mental_health = 0.0;

        assert!(run_death_checks(&mut state, &tuning, &mut rng, &mut log));
        assert_eq!(state.cause_of_end, Some(CauseOfEnd::HealthFailure));
    }

    #[test]
    fn test_mental_health_checked_second() {
        let (mut state, tuning, mut rng, mut log) = setup();
        state.health = 50.0;
        state.mental_health = 0.0;

        assert!(run_death_checks(&mut state, &tuning, &mut rng, &mut log));
        assert_eq!(state.cause_of_end, Some(CauseOfEnd::MentalHealthCrisis));
    }

    #[test]
    fn test_bmi_band_is_terminal() {
        let (mut state, tuning, mut rng, mut log) = setup();
        state.weight = 200.0;
        state.height = 1.5; // BMI 88.9

        assert!(run_death_checks(&mut state, &tuning, &mut rng, &mut log));
        assert_eq!(state.cause_of_end, Some(CauseOfEnd::WeightRelated));
    }

    #[test]
    fn test_streak_updates() {
        let (mut state, tuning, _rng, _log) = setup();
        state.happiness = 10.0;
        update_streaks(&mut state, &tuning);
        update_streaks(&mut state, &tuning);
        assert_eq!(state.low_happiness_streak, 2);

        state.happiness = 50.0;
        update_streaks(&mut state, &tuning);
        assert_eq!(state.low_happiness_streak, 0);
    }

    #[test]
    fn test_survivor_stays_alive() {
        let (mut state, tuning, mut rng, mut log) = setup();
        // Healthy, wealthy, no risk modifiers: only the residual risk remains
        state.money = 50_000.0;
        let mut deaths = 0;
        for _ in 0..100 {
            let mut s = state.clone();
            if run_death_checks(&mut s, &tuning, &mut rng, &mut log) {
                deaths += 1;
            }
        }
        // base_accident_risk = 0.002: expect roughly 0 deaths in 100 trials
        assert!(deaths <= 3);
    }

    #[test]
    fn test_collapse_check_keeps_health_priority() {
        let (mut state, _tuning, _rng, mut log) = setup();
        state.health = 30.0;
        state.mental_health = 30.0;
        assert!(!vital_collapse_check(&mut state, &mut log));
        assert!(state.alive);

        state.health = 0.0;
        state.mental_health = 0.0;
        assert!(vital_collapse_check(&mut state, &mut log));
        assert_eq!(state.cause_of_end, Some(CauseOfEnd::HealthFailure));
    }

    #[test]
    fn test_jailed_checks_skip_accident_risk() {
        let (mut state, _tuning, _rng, mut log) = setup();
        state.money = 0.0; // would add accident risk on an active day
        state.health = 40.0;
        state.mental_health = 40.0;
        assert!(!run_jailed_death_checks(&mut state, &mut log));
        assert!(state.alive);
    }

    #[test]
    fn test_dead_agent_is_not_rechecked() {
        let (mut state, tuning, mut rng, mut log) = setup();
        state.terminate(CauseOfEnd::OldAge);
        assert!(run_death_checks(&mut state, &tuning, &mut rng, &mut log));
        assert_eq!(state.cause_of_end, Some(CauseOfEnd::OldAge));
    }
}
