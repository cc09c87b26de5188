//! Environment Wrapper
//!
//! The reset/step loop around the day engine. `reset` rebuilds the engine
//! from a seed; `step` applies the chosen action's perturbation, advances
//! exactly one day, and returns observation, reward, done, and an info
//! record. Once an episode is done, further steps are absorbing: zero
//! observation, zero reward, done stays true, the engine is never touched.

use serde::Serialize;
use tracing::debug;

use life_core::{SimConfig, Simulation};

use crate::action::Action;
use crate::observation::{observe, zero_observation};
use crate::reward;

/// Default episode cap in days when none is given.
pub const DEFAULT_MAX_DAYS: u32 = 10_000;

/// Diagnostic side channel returned with every step. Not for training
/// inputs; serialized as-is into episode logs.
#[derive(Debug, Clone, Serialize)]
pub struct StepInfo {
    pub day: u32,
    pub age: f32,
    pub net_worth: f64,
    pub happiness: f32,
    pub cause_of_end: Option<&'static str>,
}

/// Everything a step returns.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub observation: Vec<f32>,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// The episodic environment over the life engine.
pub struct LifeEnv {
    config: SimConfig,
    max_days: u32,
    sim: Simulation,
    done: bool,
}

impl LifeEnv {
    /// Build an environment with the given base config. The config's seed is
    /// used for the first episode and as the fallback when `reset` is called
    /// without one.
    pub fn new(config: SimConfig) -> Self {
        let sim = Simulation::new(config.clone());
        Self {
            config,
            max_days: DEFAULT_MAX_DAYS,
            sim,
            done: false,
        }
    }

    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    /// Start a new episode and return its first observation. A seed replaces
    /// the config's; `None` reuses it, reproducing the same episode.
    pub fn reset(&mut self, seed: Option<u64>) -> Vec<f32> {
        if let Some(seed) = seed {
            self.config.seed = seed;
        }
        self.sim = Simulation::new(self.config.clone());
        self.done = false;
        debug!(seed = self.config.seed, "episode reset");
        observe(self.sim.state())
    }

    /// Apply one action and advance one day.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        if self.done {
            return StepOutcome {
                observation: zero_observation(),
                reward: 0.0,
                done: true,
                info: self.info(),
            };
        }

        action.apply(self.sim.state_mut());
        self.sim.advance_one_day();

        let state = self.sim.state();
        let reward = reward::compute(state);
        self.done = !state.alive || state.day >= self.max_days;

        debug!(
            day = state.day,
            action = action.id(),
            reward,
            done = self.done,
            "env step"
        );

        StepOutcome {
            observation: observe(state),
            reward,
            done: self.done,
            info: self.info(),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn info(&self) -> StepInfo {
        let state = self.sim.state();
        StepInfo {
            day: state.day,
            age: state.age,
            net_worth: state.net_worth(),
            happiness: state.happiness,
            cause_of_end: state.cause_of_end.map(|c| c.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::OBS_LEN;

    #[test]
    fn test_reset_returns_initial_observation() {
        let mut env = LifeEnv::new(SimConfig::new(11));
        let obs = env.reset(Some(11));
        assert_eq!(obs.len(), OBS_LEN);
        assert_eq!(env.simulation().state().day, 0);
    }

    #[test]
    fn test_step_advances_one_day() {
        let mut env = LifeEnv::new(SimConfig::new(12));
        env.reset(None);
        let out = env.step(Action::NoOp);
        assert_eq!(out.info.day, 1);
        assert_eq!(out.observation.len(), OBS_LEN);
    }

    #[test]
    fn test_absorbing_after_done() {
        let mut env = LifeEnv::new(SimConfig::new(13));
        env.reset(None);
        env.sim.state_mut().health = 0.0;
        let terminal = env.step(Action::NoOp);
        assert!(terminal.done);
        assert_eq!(terminal.reward, reward::TERMINAL_PENALTY);

        let after = env.step(Action::PhysicalHealthFocus);
        assert!(after.done);
        assert_eq!(after.reward, 0.0);
        assert_eq!(after.observation, zero_observation());
        assert_eq!(after.info.day, terminal.info.day, "engine untouched");
    }

    #[test]
    fn test_max_days_truncates_episode() {
        let mut env = LifeEnv::new(SimConfig::new(14)).with_max_days(5);
        env.reset(None);
        let mut last_done = false;
        for _ in 0..5 {
            last_done = env.step(Action::NoOp).done;
        }
        assert!(last_done);
        assert_eq!(env.simulation().state().day, 5);
    }

    #[test]
    fn test_reset_with_seed_reproduces_episode() {
        let mut env = LifeEnv::new(SimConfig::new(1));
        let a = env.reset(Some(99));
        let b = env.reset(Some(99));
        assert_eq!(a, b);
    }
}
