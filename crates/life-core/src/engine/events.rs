//! Random Event Table
//!
//! One cumulative-probability table drawn once per day-step. Rows are
//! ordered, mutually exclusive bands `(upper_bound, event)`; a single
//! uniform draw is compared against the bounds in order and the first band
//! containing it fires. A draw past the last bound means no event. Reusing
//! one draw across bands is intentional: it is what makes the outcomes
//! mutually exclusive.

use crate::config::{FeatureSet, Tuning};
use crate::output::NarrativeLog;
use crate::rng::RandomStream;
use crate::state::StateRecord;

/// Events the daily table can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomEvent {
    FellIll,
    CarBreakdown,
    PositiveSocial,
    UnexpectedLearning,
    SmallWindfall,
    WorkRecognition,
}

/// A band in the cumulative table.
#[derive(Debug, Clone, Copy)]
pub struct EventBand {
    /// Upper bound of this band; the lower bound is the previous row's upper.
    pub upper: f32,
    pub event: RandomEvent,
}

/// Ordered cumulative-probability table.
#[derive(Debug, Clone)]
pub struct EventTable {
    bands: Vec<EventBand>,
}

impl EventTable {
    /// The standard daily table. Bands sum to 0.25; three quarters of days
    /// pass without an event.
    pub fn standard() -> Self {
        Self {
            bands: vec![
                EventBand { upper: 0.04, event: RandomEvent::FellIll },
                EventBand { upper: 0.08, event: RandomEvent::CarBreakdown },
                EventBand { upper: 0.12, event: RandomEvent::PositiveSocial },
                EventBand { upper: 0.16, event: RandomEvent::UnexpectedLearning },
                EventBand { upper: 0.20, event: RandomEvent::SmallWindfall },
                EventBand { upper: 0.25, event: RandomEvent::WorkRecognition },
            ],
        }
    }

    /// Build a table from explicit bands. Upper bounds must be strictly
    /// increasing and at most 1.0; enforced by debug assertion since tables
    /// are constructed from literals.
    pub fn from_bands(bands: Vec<EventBand>) -> Self {
        debug_assert!(bands.windows(2).all(|w| w[0].upper < w[1].upper));
        debug_assert!(bands.last().map_or(true, |b| b.upper <= 1.0));
        Self { bands }
    }

    /// Resolve a single uniform draw to the event whose band contains it.
    pub fn pick(&self, draw: f32) -> Option<RandomEvent> {
        self.bands
            .iter()
            .find(|band| draw < band.upper)
            .map(|band| band.event)
    }
}

/// Draw from the table once and apply the selected event's effect bundle.
pub fn run_daily_event(
    state: &mut StateRecord,
    table: &EventTable,
    tuning: &Tuning,
    features: &FeatureSet,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) -> Option<RandomEvent> {
    let draw = rng.draw();
    let event = table.pick(draw)?;
    // With the illness subsystem off, nothing would ever progress or cure a
    // sickness, so a FellIll draw becomes a quiet day instead.
    if event == RandomEvent::FellIll && !features.illness {
        return None;
    }
    apply_event(state, event, tuning, rng, log);
    Some(event)
}

fn apply_event(
    state: &mut StateRecord,
    event: RandomEvent,
    tuning: &Tuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    match event {
        RandomEvent::FellIll => {
            if !state.sick {
                state.sick = true;
                state.sick_days_remaining =
                    rng.integer(tuning.illness.sick_days_min, tuning.illness.sick_days_max);
                state.sickness_severity =
                    rng.uniform(tuning.illness.severity_min, tuning.illness.severity_max);
                log.push(state.day, "Fell ill");
            }
        }
        RandomEvent::CarBreakdown => {
            if state.car_working {
                state.car_working = false;
                state.car_repair_cost_parts = rng.uniform_f64(400.0, 1500.0);
                state.car_repair_cost_shop = rng.uniform_f64(1200.0, 6000.0);
                state.stress += 5.0;
                log.push(state.day, "Car broke down");
            }
        }
        RandomEvent::PositiveSocial => {
            state.social_support += rng.uniform(5.0, 15.0);
            state.happiness += 15.0;
            log.push(state.day, "Positive social interaction");
        }
        RandomEvent::UnexpectedLearning => {
            state.skill_level += 0.05;
            log.push(state.day, "Learned something useful unexpectedly");
        }
        RandomEvent::SmallWindfall => {
            let gain = rng.uniform_f64(300.0, 1500.0);
            state.money += gain;
            log.push(state.day, format!("Small windfall +${gain:.0}"));
        }
        RandomEvent::WorkRecognition => {
            if state.has_job {
                state.job_stability += 10.0;
                state.job_satisfaction += 5.0;
                log.push(state.day, "Positive feedback at work");
            }
        }
    }
}
