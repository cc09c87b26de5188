//! Legal Handlers
//!
//! Traffic stops, desperation crime, arrest and sentencing, and probation
//! countdown. An arrest transitions the engine into the Jailed macro-state;
//! release from jail starts a probation window.

use crate::config::LegalTuning;
use crate::output::NarrativeLog;
use crate::rng::RandomStream;
use crate::state::{Crime, StateRecord, TransportMode};

/// Daily legal checks for an active day.
pub fn legal_checks(
    state: &mut StateRecord,
    tuning: &LegalTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    probation_countdown(state, log);
    traffic_check(state, tuning, rng, log);
    desperation_crime_check(state, tuning, rng, log);
}

fn probation_countdown(state: &mut StateRecord, log: &mut NarrativeLog) {
    if state.probation {
        state.probation_days_remaining -= 1;
        if state.probation_days_remaining <= 0 {
            state.probation = false;
            log.push(state.day, "Probation period ended");
        }
    }
}

/// Traffic stop check; only fires on days the agent actually drove.
fn traffic_check(
    state: &mut StateRecord,
    tuning: &LegalTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    if state.transport_today != TransportMode::OwnCar {
        return;
    }

    if state.license_suspended {
        // Driving on a suspended license risks immediate arrest.
        if rng.chance(tuning.traffic_stop_chance) {
            log.push(state.day, "Caught driving on a suspended license");
            arrest(state, Crime::Vandalism, tuning, rng, log);
        }
        return;
    }

    if !rng.chance(tuning.traffic_stop_chance) {
        return;
    }

    let impaired = state.alcohol_dependency > tuning.dui_dependency_threshold;
    if impaired && rng.chance(0.5) {
        log.push(state.day, "Pulled over while impaired");
        state.license_suspended = true;
        arrest(state, Crime::Dui, tuning, rng, log);
    } else {
        let fine = rng.uniform_f64(tuning.speeding_fine_min, tuning.speeding_fine_max);
        state.money -= fine;
        state.stress += 4.0;
        log.push(state.day, format!("Speeding ticket -${fine:.0}"));
    }
}

/// Deep poverty occasionally pushes the agent toward theft.
fn desperation_crime_check(
    state: &mut StateRecord,
    tuning: &LegalTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    if state.money >= 50.0 || state.in_jail {
        return;
    }
    if !rng.chance(0.01) {
        return;
    }

    if rng.chance(0.6) {
        // Got away with it
        state.money += rng.uniform_f64(40.0, 200.0);
        state.stress += 10.0;
        state.mental_health -= 3.0;
        log.push(state.day, "Resorted to petty theft");
    } else {
        log.push(state.day, "Caught stealing");
        arrest(state, Crime::Theft, tuning, rng, log);
    }
}

/// Book the agent: record the crime, sentence to jail, and sever employment
/// for long sentences.
pub fn arrest(
    state: &mut StateRecord,
    crime: Crime,
    tuning: &LegalTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    state.criminal_record.push(crime);
    state.arrest_count += 1;
    state.reputation -= 15.0;
    state.happiness -= 20.0;
    state.stress += 20.0;

    let sentence = rng.integer(tuning.jail_days_min, tuning.jail_days_max);
    state.in_jail = true;
    state.jail_days_remaining = sentence;
    log.push(
        state.day,
        format!("Arrested ({:?}), sentenced to {} days", crime, sentence),
    );

    if sentence > 30 && state.has_job {
        state.has_job = false;
        state.monthly_income = 0.0;
        state.job_stability = 0.0;
        log.push(state.day, "Lost job while incarcerated");
    }
}

/// Decrement the sentence; on reaching zero, release onto probation.
pub fn jail_countdown(state: &mut StateRecord, tuning: &LegalTuning, log: &mut NarrativeLog) {
    state.jail_days_remaining -= 1;
    if state.jail_days_remaining <= 0 {
        state.in_jail = false;
        state.jail_days_remaining = 0;
        state.probation = true;
        state.probation_days_remaining = tuning.probation_days;
        log.push(state.day, "Released from jail on probation");
    }
}
