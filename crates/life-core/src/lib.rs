//! Life Simulation Engine
//!
//! A stochastic, discrete-time simulation of a single agent's life. Each
//! call to [`Simulation::advance_one_day`] advances simulated time by one
//! day, mutating a flat state record (vitals, finances, relationships,
//! career, legal status, substances) according to probabilistic rules, and
//! appends one structured record to the day log. Termination (death) is an
//! absorbing state; further calls are no-ops.
//!
//! The `life-env` crate wraps this engine as a reinforcement-learning
//! environment.

pub mod config;
pub mod engine;
pub mod output;
pub mod policy;
pub mod rng;
pub mod state;

pub use config::{FeatureSet, SimConfig, Tuning};
pub use engine::Simulation;
pub use output::{DaySnapshot, NarrativeLog};
pub use policy::DecisionContext;
pub use rng::{DistributionError, RandomStream};
pub use state::{CauseOfEnd, PersonRecord, RelationType, StateRecord};
