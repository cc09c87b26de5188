//! Daily Step Engine
//!
//! Orchestrates one simulated day: fixed costs and decays, the ordered
//! decision categories, subsystem handlers, the random-event draw,
//! employment and relationship continuity, terminal checks, the clamp pass,
//! and the day-log append. Two macro-states: Active and Jailed. The fixed
//! sequence of handler invocations is part of the observable contract;
//! reordering changes outcome distributions.

pub mod decisions;
pub mod events;
pub mod family;
pub mod finance;
pub mod legal;
pub mod mortality;
pub mod wellness;

use tracing::debug;

use crate::config::SimConfig;
use crate::output::{DaySnapshot, NarrativeLog};
use crate::rng::RandomStream;
use crate::state::{StateRecord, TransportMode, DAYS_PER_YEAR};

use events::EventTable;

/// A complete simulation instance: state, people, tuning, random stream,
/// and output logs. Single-threaded and synchronous; `advance_one_day` runs
/// to completion with no suspension point and no I/O.
pub struct Simulation {
    config: SimConfig,
    state: StateRecord,
    event_table: EventTable,
    rng: RandomStream,
    day_log: Vec<DaySnapshot>,
    narrative: NarrativeLog,
}

impl Simulation {
    /// Build a fresh simulation from a config. Generation draws from the
    /// stream in a fixed order, so a seed fully determines the start state.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = RandomStream::seeded(config.seed);
        let mut state = StateRecord::generate(&mut rng);
        if config.features.family {
            family::seed_social_world(&mut state, &config.tuning.family, &mut rng);
        }
        Self {
            config,
            state,
            event_table: EventTable::standard(),
            rng,
            day_log: Vec::new(),
            narrative: NarrativeLog::new(),
        }
    }

    pub fn state(&self) -> &StateRecord {
        &self.state
    }

    /// Mutable state access, for callers that inject perturbations before a
    /// step (the RL adapter) and for tests.
    pub fn state_mut(&mut self) -> &mut StateRecord {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn day_log(&self) -> &[DaySnapshot] {
        &self.day_log
    }

    pub fn narrative(&self) -> &[String] {
        self.narrative.entries()
    }

    /// True once the agent is dead.
    pub fn is_over(&self) -> bool {
        !self.state.alive
    }

    /// Advance the simulation by exactly one day.
    ///
    /// Idempotent after termination: once `alive` is false this is a no-op,
    /// and no field mutates again.
    pub fn advance_one_day(&mut self) {
        if !self.state.alive {
            return;
        }

        if self.state.in_jail {
            self.jailed_day();
            return;
        }

        self.active_day();
    }

    /// The abbreviated day while incarcerated: time passes, conditions
    /// grind, the main decision sequence is skipped entirely.
    fn jailed_day(&mut self) {
        let tuning = &self.config.tuning;
        let state = &mut self.state;

        state.day += 1;
        state.age += 1.0 / DAYS_PER_YEAR;
        state.transport_today = TransportMode::Home;

        state.health -= 0.1;
        state.mental_health -= 0.5;
        state.happiness -= 1.0;
        state.stress += 0.5;
        state.energy = (state.energy + 30.0).min(100.0);

        legal::jail_countdown(state, &tuning.legal, &mut self.narrative);

        mortality::run_jailed_death_checks(state, &mut self.narrative);

        state.clamp_bounds(tuning);
        #[cfg(debug_assertions)]
        state.assert_invariants(tuning);

        self.day_log.push(DaySnapshot::capture(state));
        debug!(day = state.day, "jailed day complete");
    }

    fn active_day(&mut self) {
        let features = self.config.features;
        let tuning = self.config.tuning.clone();
        let state = &mut self.state;
        let rng = &mut self.rng;
        let log = &mut self.narrative;

        // 3. Time advances; per-day transients reset.
        state.day += 1;
        state.age += 1.0 / DAYS_PER_YEAR;
        state.transport_today = TransportMode::Home;

        // A vital already at zero is fatal before anything else happens;
        // the day's recovery effects must not resurrect a collapsed state.
        if mortality::vital_collapse_check(state, log) {
            state.clamp_bounds(&tuning);
            #[cfg(debug_assertions)]
            state.assert_invariants(&tuning);
            self.day_log.push(DaySnapshot::capture(state));
            return;
        }

        // 4. Daily living cost and poverty penalties.
        let cost = finance::roll_daily_cost(state, &tuning.finance, rng);
        finance::apply_daily_cost(state, &tuning.finance, cost, log);

        // 5. Monthly boundary: bills, interest, paycheck.
        if state.day % 30 == 1 {
            finance::monthly_cycle(state, &tuning.finance, log);
        }

        // 6. Natural decay and overnight energy recovery.
        state.health -= tuning.vitals.health_decay;
        state.happiness -= tuning.vitals.happiness_decay;
        state.mental_health -= tuning.vitals.mental_health_decay;
        state.energy = (state.energy + tuning.vitals.energy_recovery).min(100.0);
        state.stress -= tuning.vitals.stress_decay;

        // 7. Ordered decision categories.
        decisions::run_decision_phase(state, &tuning, &features, rng, log);

        // 8. Subsystem handlers, fixed order.
        if features.illness {
            wellness::illness_progression(state, &tuning.illness, rng, log);
        }
        if features.substances {
            wellness::substance_progression(state, &tuning.substances, rng, log);
        }
        if features.legal {
            legal::legal_checks(state, &tuning.legal, rng, log);
        }
        if features.family {
            family::family_daily(state, &tuning.family, rng, log);
            family::relationship_progression(state, &tuning.family, rng, log);
        }
        if features.market {
            finance::market_fluctuation(state, &tuning.finance, rng);
        }

        // 9. One draw against the cumulative event table.
        events::run_daily_event(state, &self.event_table, &tuning, &features, rng, log);

        // 10. Continuity checks.
        finance::employment_continuity(state, rng, log);
        if features.family {
            family::relationship_drift(state, &tuning.family, rng, log);
        }

        // An arrest during step 8 may have jailed the agent mid-day; the
        // sentence starts counting tomorrow.

        // 11. Streaks, then terminal checks in priority order.
        mortality::update_streaks(state, &tuning.mortality);
        mortality::run_death_checks(state, &tuning.mortality, rng, log);

        // 12. Clamp every bounded field.
        state.clamp_bounds(&tuning);
        #[cfg(debug_assertions)]
        state.assert_invariants(&tuning);

        // 13. Day-log append.
        self.day_log.push(DaySnapshot::capture(state));
        debug!(
            day = state.day,
            health = state.health,
            money = state.money,
            alive = state.alive,
            "day complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeatureSet, SimConfig};
    use crate::state::CauseOfEnd;

    fn sim(seed: u64) -> Simulation {
        Simulation::new(SimConfig::new(seed))
    }

    #[test]
    fn test_day_and_age_advance_exactly() {
        let mut sim = sim(1);
        let age0 = sim.state().age;
        for expected_day in 1..=10u32 {
            sim.advance_one_day();
            assert_eq!(sim.state().day, expected_day);
        }
        let elapsed = sim.state().age - age0;
        assert!((elapsed - 10.0 / DAYS_PER_YEAR).abs() < 1e-4);
    }

    #[test]
    fn test_bounded_fields_clamped_every_step() {
        let mut sim = sim(2);
        for _ in 0..200 {
            sim.advance_one_day();
            let s = sim.state();
            for v in [s.health, s.mental_health, s.energy, s.happiness, s.stress] {
                assert!((0.0..=100.0).contains(&v));
            }
            assert!((300..=850).contains(&s.credit_score));
            assert!(s.skill_level >= 0.5);
            if !s.alive {
                break;
            }
        }
    }

    #[test]
    fn test_terminal_step_is_idempotent() {
        let mut sim = sim(3);
        sim.state_mut().health = -10.0;
        sim.advance_one_day();
        assert!(!sim.state().alive);
        assert_eq!(sim.state().cause_of_end, Some(CauseOfEnd::HealthFailure));

        let day_after_death = sim.state().day;
        let logs_after_death = sim.day_log().len();
        let frozen = serde_json::to_string(sim.state()).unwrap();

        for _ in 0..5 {
            sim.advance_one_day();
        }
        assert_eq!(sim.state().day, day_after_death);
        assert_eq!(sim.day_log().len(), logs_after_death);
        assert_eq!(serde_json::to_string(sim.state()).unwrap(), frozen);
    }

    #[test]
    fn test_jailed_day_skips_decisions_but_advances_time() {
        let mut sim = sim(4);
        {
            let s = sim.state_mut();
            s.in_jail = true;
            s.jail_days_remaining = 5;
            s.money = 8000.0;
        }
        let money_before = sim.state().money;
        sim.advance_one_day();

        let s = sim.state();
        assert_eq!(s.day, 1);
        assert_eq!(s.jail_days_remaining, 4);
        // No daily cost, no decisions: money untouched in jail
        assert_eq!(s.money, money_before);
        assert_eq!(sim.day_log().len(), 1);
    }

    #[test]
    fn test_jail_release_enters_probation() {
        let mut sim = sim(5);
        {
            let s = sim.state_mut();
            s.in_jail = true;
            s.jail_days_remaining = 2;
        }
        sim.advance_one_day();
        sim.advance_one_day();
        assert!(!sim.state().in_jail);
        assert!(sim.state().probation);
    }

    #[test]
    fn test_minimal_features_disable_subsystems() {
        let config = SimConfig::new(6).with_features(FeatureSet::minimal());
        let mut sim = Simulation::new(config);
        assert!(sim.state().people.is_empty(), "no family seeded");
        for _ in 0..300 {
            sim.advance_one_day();
            // Nothing could ever cure a sickness in this configuration, so
            // none may ever start
            assert!(!sim.state().sick);
            if sim.is_over() {
                break;
            }
        }
    }

    #[test]
    fn test_day_log_appends_one_record_per_step() {
        let mut sim = sim(7);
        for i in 1..=30 {
            sim.advance_one_day();
            if sim.is_over() {
                break;
            }
            assert_eq!(sim.day_log().len(), i);
            assert_eq!(sim.day_log()[i - 1].day, i as u32);
        }
    }
}
