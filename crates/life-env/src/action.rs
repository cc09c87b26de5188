//! Discrete Action Set
//!
//! The fixed enumeration of daily "focus" actions exposed to a learning
//! agent. Each action is a pure perturbation: a fixed effect bundle applied
//! to the state exactly once, immediately before the day step, never
//! retried or queued. The id mapping is a contract; trained policies depend
//! on it.

use serde::{Deserialize, Serialize};

use life_core::state::{RelationshipStatus, StateRecord};

/// Number of discrete actions.
pub const ACTION_COUNT: usize = 15;

/// Daily focus actions. Ids are stable: `NoOp` is always 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    PhysicalHealthFocus,
    MentalHealthFocus,
    CareerEffort,
    JobSearchPush,
    Education,
    ConservativeSaving,
    RiskyInvesting,
    Socializing,
    FamilyFocus,
    HobbyEngagement,
    SeekTreatment,
    StressReduction,
    MajorPurchase,
    Volunteering,
    NoOp,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::PhysicalHealthFocus,
        Action::MentalHealthFocus,
        Action::CareerEffort,
        Action::JobSearchPush,
        Action::Education,
        Action::ConservativeSaving,
        Action::RiskyInvesting,
        Action::Socializing,
        Action::FamilyFocus,
        Action::HobbyEngagement,
        Action::SeekTreatment,
        Action::StressReduction,
        Action::MajorPurchase,
        Action::Volunteering,
        Action::NoOp,
    ];

    /// Stable discrete id, 0-based.
    pub fn id(&self) -> usize {
        Self::ALL.iter().position(|a| a == self).expect("action in ALL")
    }

    /// Map a discrete id back to an action. Out-of-range ids resolve to
    /// `NoOp` rather than failing, so a clumsy caller cannot crash the loop.
    pub fn from_id(id: usize) -> Action {
        Self::ALL.get(id).copied().unwrap_or(Action::NoOp)
    }

    /// Apply this action's fixed perturbation bundle to the state. Runs
    /// before the day step; deterministic, no randomness.
    pub fn apply(&self, state: &mut StateRecord) {
        match self {
            Action::PhysicalHealthFocus => {
                state.health += 2.0;
                state.energy += 5.0;
                state.happiness += 1.0;
                state.money -= 30.0;
            }
            Action::MentalHealthFocus => {
                state.mental_health += 3.0;
                state.stress -= 5.0;
                state.money -= 40.0;
            }
            Action::CareerEffort => {
                if state.has_job {
                    state.job_stability += 1.5;
                    state.skill_level += 0.01;
                }
                state.energy -= 10.0;
            }
            Action::JobSearchPush => {
                state.skill_level += 0.005;
                state.energy -= 5.0;
                state.stress += 2.0;
            }
            Action::Education => {
                state.skill_level += 0.02;
                state.energy -= 15.0;
                state.money -= 20.0;
            }
            Action::ConservativeSaving => {
                let amount = (state.money * 0.05).min(200.0).max(0.0);
                state.money -= amount;
                state.investments += amount;
            }
            Action::RiskyInvesting => {
                let amount = (state.money * 0.10).min(500.0).max(0.0);
                state.money -= amount;
                state.investments += amount;
                state.stress += 2.0;
            }
            Action::Socializing => {
                state.happiness += 3.0;
                state.social_support += 2.0;
                state.money -= 25.0;
                state.energy -= 10.0;
            }
            Action::FamilyFocus => {
                if state.relationship_status != RelationshipStatus::Single {
                    state.relationship_satisfaction += 3.0;
                }
                state.social_support += 1.5;
                state.happiness += 2.0;
                state.energy -= 5.0;
            }
            Action::HobbyEngagement => {
                state.happiness += 4.0;
                state.stress -= 4.0;
                state.money -= 15.0;
            }
            Action::SeekTreatment => {
                if state.alcohol_dependency > 20.0 || state.drug_dependency > 20.0 {
                    state.in_recovery = true;
                }
                state.in_therapy = true;
                state.money -= 50.0;
                state.stress -= 3.0;
            }
            Action::StressReduction => {
                state.stress -= 8.0;
                state.mental_health += 1.0;
                state.energy += 3.0;
            }
            Action::MajorPurchase => {
                state.money -= 400.0;
                state.happiness += 10.0;
                state.stress -= 2.0;
            }
            Action::Volunteering => {
                state.reputation += 2.0;
                state.happiness += 3.0;
                state.mental_health += 1.0;
                state.energy -= 10.0;
            }
            Action::NoOp => {}
        }
    }
}
