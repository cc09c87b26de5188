//! Day-Log Output
//!
//! Serialization structs for per-day snapshots and the narrative stream.
//! One [`DaySnapshot`] is appended per completed day-step; the rounding
//! precision (1 decimal for physical quantities, 2 for money) is part of the
//! contract consumed by reporting collaborators and snapshot-based tests.

use serde::{Deserialize, Serialize};

use crate::state::{RelationshipStatus, StateRecord};

/// Round to 1 decimal, for physical quantities.
pub fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

/// Round to 2 decimals, for money.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// One structured record per completed day-step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub day: u32,
    pub age: f32,
    pub weight: f32,
    pub bmi: f32,
    pub health: f32,
    pub mental_health: f32,
    pub energy: f32,
    pub happiness: f32,
    pub stress: f32,
    pub money: f64,
    pub debt: f64,
    pub student_loan_debt: f64,
    pub investments: f64,
    pub retirement_savings: f64,
    pub net_worth: f64,
    pub credit_score: i32,
    pub skill_level: f32,
    pub social_support: f32,
    pub reputation: f32,
    pub has_job: bool,
    pub car_working: bool,
    pub sick: bool,
    pub in_jail: bool,
    pub relationship_status: RelationshipStatus,
    pub alive: bool,
}

impl DaySnapshot {
    /// Capture a rounded snapshot of the current state.
    pub fn capture(state: &StateRecord) -> Self {
        Self {
            day: state.day,
            age: round1(state.age),
            weight: round1(state.weight),
            bmi: round1(state.bmi()),
            health: round1(state.health),
            mental_health: round1(state.mental_health),
            energy: round1(state.energy),
            happiness: round1(state.happiness),
            stress: round1(state.stress),
            money: round2(state.money),
            debt: round2(state.debt),
            student_loan_debt: round2(state.student_loan_debt),
            investments: round2(state.investments),
            retirement_savings: round2(state.retirement_savings),
            net_worth: round2(state.net_worth()),
            credit_score: state.credit_score,
            skill_level: round1(state.skill_level),
            social_support: round1(state.social_support),
            reputation: round1(state.reputation),
            has_job: state.has_job,
            car_working: state.car_working,
            sick: state.sick,
            in_jail: state.in_jail,
            relationship_status: state.relationship_status,
            alive: state.alive,
        }
    }
}

/// Append-only stream of human-readable, day-stamped messages. Write-only
/// from the engine's perspective; never read back for correctness.
#[derive(Debug, Clone, Default)]
pub struct NarrativeLog {
    entries: Vec<String>,
}

impl NarrativeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `"Day <n>: <message>"` entry.
    pub fn push(&mut self, day: u32, message: impl AsRef<str>) {
        self.entries.push(format!("Day {}: {}", day, message.as_ref()));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomStream;

    #[test]
    fn test_rounding_contract() {
        assert_eq!(round1(24.489796), 24.5);
        assert_eq!(round1(0.04), 0.0);
        assert_eq!(round2(1234.5678), 1234.57);
        assert_eq!(round2(10.016), 10.02);
    }

    #[test]
    fn test_capture_rounds_fields() {
        let mut rng = RandomStream::seeded(2);
        let mut state = crate::state::StateRecord::generate(&mut rng);
        state.day = 3;
        state.health = 87.6543;
        state.money = 1234.5678;

        let snap = DaySnapshot::capture(&state);
        assert_eq!(snap.day, 3);
        assert_eq!(snap.health, 87.7);
        assert_eq!(snap.money, 1234.57);
        assert_eq!(snap.net_worth, round2(state.net_worth()));
    }

    #[test]
    fn test_snapshot_serializes_round_trip() {
        let mut rng = RandomStream::seeded(2);
        let state = crate::state::StateRecord::generate(&mut rng);
        let snap = DaySnapshot::capture(&state);
        let json = serde_json::to_string(&snap).unwrap();
        let back: DaySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }

    #[test]
    fn test_narrative_format() {
        let mut log = NarrativeLog::new();
        log.push(12, "Fell ill");
        assert_eq!(log.entries()[0], "Day 12: Fell ill");
        assert_eq!(log.len(), 1);
    }
}
