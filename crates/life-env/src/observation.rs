//! Observation Vector
//!
//! Fixed-length normalized projection of the state record. The length and
//! field order are a contract: a trained policy depends on positional
//! stability, so changing either is a breaking change. Bounded fields
//! divide by their range; unbounded monetary fields go through a tanh
//! soft-cap.

use life_core::state::{RelationshipStatus, StateRecord};

/// Declared observation length. Frozen.
pub const OBS_LEN: usize = 32;

fn soft_cap(value: f64, scale: f64) -> f32 {
    (value / scale).tanh() as f32
}

/// Project the state into the fixed observation layout.
pub fn observe(state: &StateRecord) -> Vec<f32> {
    let relationship = match state.relationship_status {
        RelationshipStatus::Single => 0.0,
        RelationshipStatus::Dating => 0.5,
        RelationshipStatus::Married => 1.0,
    };

    let obs = vec![
        state.health / 100.0,
        state.mental_health / 100.0,
        state.energy / 100.0,
        state.happiness / 100.0,
        state.stress / 100.0,
        (state.weight - 40.0) / 160.0,
        state.bmi() / 50.0,
        soft_cap(state.money, 20_000.0),
        soft_cap(state.debt, 10_000.0),
        soft_cap(state.student_loan_debt, 20_000.0),
        soft_cap(state.investments, 50_000.0),
        soft_cap(state.retirement_savings, 100_000.0),
        (state.credit_score - 300) as f32 / 550.0,
        soft_cap(state.monthly_income, 10_000.0),
        if state.has_job { 1.0 } else { 0.0 },
        state.job_stability / 100.0,
        state.job_satisfaction / 100.0,
        (state.skill_level / 5.0).tanh(),
        state.social_support / 100.0,
        state.reputation / 100.0,
        relationship,
        state.relationship_satisfaction / 100.0,
        (state.living_children().min(5) as f32) / 5.0,
        state.alcohol_dependency / 100.0,
        state.drug_dependency / 100.0,
        if state.smoking { 1.0 } else { 0.0 },
        (state.criminal_record.len().min(10) as f32) / 10.0,
        if state.in_jail { 1.0 } else { 0.0 },
        if state.sick { 1.0 } else { 0.0 },
        if state.car_working { 1.0 } else { 0.0 },
        state.age / 100.0,
        (state.day % 30) as f32 / 30.0,
    ];
    debug_assert_eq!(obs.len(), OBS_LEN);
    obs
}

/// The all-zero observation returned after termination.
pub fn zero_observation() -> Vec<f32> {
    vec![0.0; OBS_LEN]
}
