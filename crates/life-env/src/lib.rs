//! life-env: reinforcement-learning environment adapter over life-core.
//!
//! Wraps the day engine in a reset/step episode loop with a fixed discrete
//! action set, a frozen-layout observation vector, and a scalar reward.
//! The engine stays the single source of truth; the adapter only injects an
//! action perturbation before each day and projects the state afterward.

pub mod action;
pub mod env;
pub mod observation;
pub mod reward;

pub use action::{Action, ACTION_COUNT};
pub use env::{LifeEnv, StepInfo, StepOutcome, DEFAULT_MAX_DAYS};
pub use observation::{observe, zero_observation, OBS_LEN};
