//! Agent State Record
//!
//! The flat mutable record describing the simulated agent: vitals, body,
//! finances, housing, health conditions, substances, legal status, and
//! social standing. Owned exclusively by the simulation; every bounded field
//! is re-clamped at the end of each day-step.

use serde::{Deserialize, Serialize};

use crate::config::Tuning;
use crate::rng::RandomStream;
use crate::state::person::People;

/// Days per simulated year, used for age accrual.
pub const DAYS_PER_YEAR: f32 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

/// Broad temperament, fixed at creation. Shifts a handful of decision
/// weights but never changes during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Cautious,
    Balanced,
    Ambitious,
    Impulsive,
}

impl Default for Personality {
    fn default() -> Self {
        Personality::Balanced
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Single,
    Dating,
    Married,
}

impl Default for RelationshipStatus {
    fn default() -> Self {
        RelationshipStatus::Single
    }
}

/// Long-running health conditions. Membership in the set is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChronicCondition {
    Hypertension,
    Diabetes,
    Asthma,
    BackPain,
    Anxiety,
    Depression,
}

/// Entries on the criminal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crime {
    Dui,
    Theft,
    Assault,
    Vandalism,
    DrugPossession,
    Fraud,
}

/// Terminal causes, checked in a fixed priority order. First match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseOfEnd {
    HealthFailure,
    MentalHealthCrisis,
    GaveUp,
    WeightRelated,
    Overdose,
    OldAge,
    CarAccident,
    HitByVehicle,
    ViolentCrime,
    HealthComplication,
}

impl CauseOfEnd {
    /// Stable snake_case tag, part of the day-log and info-map contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            CauseOfEnd::HealthFailure => "health_failure",
            CauseOfEnd::MentalHealthCrisis => "mental_health_crisis",
            CauseOfEnd::GaveUp => "gave_up",
            CauseOfEnd::WeightRelated => "weight_related",
            CauseOfEnd::Overdose => "overdose",
            CauseOfEnd::OldAge => "old_age",
            CauseOfEnd::CarAccident => "car_accident",
            CauseOfEnd::HitByVehicle => "hit_by_vehicle",
            CauseOfEnd::ViolentCrime => "violent_crime",
            CauseOfEnd::HealthComplication => "health_complication",
        }
    }
}

/// How the agent got around today. Reset at the start of every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Home,
    OwnCar,
    Rideshare,
    PublicTransit,
    FriendRide,
    Walked,
    SkippedWork,
}

/// The agent's full mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    // Identity / time
    pub day: u32,
    pub age: f32,
    pub name: String,
    pub gender: Gender,
    pub personality: Personality,

    // Vitals, each clamped to [0, 100]
    pub health: f32,
    pub mental_health: f32,
    pub energy: f32,
    pub happiness: f32,
    pub stress: f32,

    // Body
    pub weight: f32,
    /// Meters; fixed at creation.
    pub height: f32,

    // Finance
    pub money: f64,
    pub debt: f64,
    pub student_loan_debt: f64,
    pub investments: f64,
    pub retirement_savings: f64,
    pub credit_score: i32,
    pub monthly_income: f64,
    pub has_job: bool,
    pub job_stability: f32,
    pub job_satisfaction: f32,
    pub skill_level: f32,
    pub has_emergency_fund: bool,

    // Housing / transport
    pub owns_home: bool,
    pub home_value: f64,
    pub mortgage_payment: f64,
    pub car_working: bool,
    pub car_repair_cost_parts: f64,
    pub car_repair_cost_shop: f64,
    pub license_suspended: bool,
    pub transport_today: TransportMode,

    // Health conditions
    pub sick: bool,
    pub sick_days_remaining: i64,
    pub sickness_severity: f32,
    pub chronic_conditions: Vec<ChronicCondition>,
    pub has_health_insurance: bool,
    pub in_therapy: bool,
    pub on_medication: bool,
    pub gym_membership: bool,

    // Substances
    pub alcohol_dependency: f32,
    pub drug_dependency: f32,
    pub smoking: bool,
    pub smoking_intensity: f32,
    pub in_recovery: bool,

    // Legal
    pub criminal_record: Vec<Crime>,
    pub arrest_count: u32,
    pub in_jail: bool,
    pub jail_days_remaining: i64,
    pub probation: bool,
    pub probation_days_remaining: i64,

    // Social
    pub relationship_status: RelationshipStatus,
    pub relationship_satisfaction: f32,
    pub social_support: f32,
    pub reputation: f32,
    pub people: People,
    pub life_goals_completed: u32,

    // Termination
    pub alive: bool,
    pub cause_of_end: Option<CauseOfEnd>,
    pub low_happiness_streak: u32,
}

impl StateRecord {
    /// Generate a fresh 25-year-old agent. Draws from the stream in a fixed
    /// order so generation itself is deterministic under a seed.
    pub fn generate(rng: &mut RandomStream) -> Self {
        let gender = match rng.integer(0, 2) {
            0 => Gender::Male,
            1 => Gender::Female,
            _ => Gender::NonBinary,
        };
        let personality = match rng.integer(0, 3) {
            0 => Personality::Cautious,
            1 => Personality::Balanced,
            2 => Personality::Ambitious,
            _ => Personality::Impulsive,
        };
        // ~15% of agents start unemployed
        let employed = !rng.chance(0.15);
        let monthly_income = if employed { 4500.0 } else { 0.0 };
        let money = 15_000.0;

        Self {
            day: 0,
            age: 25.0,
            name: "Alex".to_string(),
            gender,
            personality,
            health: 100.0,
            mental_health: 80.0,
            energy: 100.0,
            happiness: 50.0,
            stress: 30.0,
            weight: 75.0,
            height: 1.75,
            money,
            debt: 0.0,
            student_loan_debt: rng.uniform_f64(0.0, 25_000.0),
            investments: 0.0,
            retirement_savings: 0.0,
            credit_score: 650,
            monthly_income,
            has_job: employed,
            job_stability: 100.0,
            job_satisfaction: 60.0,
            skill_level: 1.0,
            has_emergency_fund: money >= 5000.0,
            owns_home: false,
            home_value: 0.0,
            mortgage_payment: 0.0,
            car_working: true,
            car_repair_cost_parts: 0.0,
            car_repair_cost_shop: 0.0,
            license_suspended: false,
            transport_today: TransportMode::Home,
            sick: false,
            sick_days_remaining: 0,
            sickness_severity: 0.0,
            chronic_conditions: Vec::new(),
            has_health_insurance: false,
            in_therapy: false,
            on_medication: false,
            gym_membership: false,
            alcohol_dependency: 0.0,
            drug_dependency: 0.0,
            smoking: false,
            smoking_intensity: 0.0,
            in_recovery: false,
            criminal_record: Vec::new(),
            arrest_count: 0,
            in_jail: false,
            jail_days_remaining: 0,
            probation: false,
            probation_days_remaining: 0,
            relationship_status: RelationshipStatus::Single,
            relationship_satisfaction: 0.0,
            social_support: 50.0,
            reputation: 50.0,
            people: People::new(),
            life_goals_completed: 0,
            alive: true,
            cause_of_end: None,
            low_happiness_streak: 0,
        }
    }

    /// Body mass index from weight and fixed height.
    pub fn bmi(&self) -> f32 {
        self.weight / (self.height * self.height)
    }

    /// Net worth across all balance-sheet fields.
    pub fn net_worth(&self) -> f64 {
        let home = if self.owns_home { self.home_value } else { 0.0 };
        self.money + self.investments + self.retirement_savings + home
            - self.debt
            - self.student_loan_debt
    }

    /// Living children, as a count over the arena.
    pub fn living_children(&self) -> usize {
        self.people.count_alive(crate::state::RelationType::Child)
    }

    /// Mark the agent dead. Write-once: the first cause sticks, later calls
    /// are ignored.
    pub fn terminate(&mut self, cause: CauseOfEnd) {
        if self.alive {
            self.alive = false;
            self.cause_of_end = Some(cause);
        }
    }

    /// Re-clamp every bounded field to its declared range. Runs at the end
    /// of every day-step; no intermediate value may be read across steps
    /// before this pass.
    pub fn clamp_bounds(&mut self, tuning: &Tuning) {
        self.health = self.health.clamp(0.0, 100.0);
        self.mental_health = self.mental_health.clamp(0.0, 100.0);
        self.energy = self.energy.clamp(0.0, 100.0);
        self.happiness = self.happiness.clamp(0.0, 100.0);
        self.stress = self.stress.clamp(0.0, 100.0);
        self.weight = self
            .weight
            .clamp(tuning.body.min_weight, tuning.body.max_weight);
        self.job_stability = self.job_stability.clamp(0.0, 100.0);
        self.job_satisfaction = self.job_satisfaction.clamp(0.0, 100.0);
        self.skill_level = self.skill_level.max(0.5);
        self.social_support = self.social_support.clamp(0.0, 100.0);
        self.reputation = self.reputation.clamp(0.0, 100.0);
        self.relationship_satisfaction = self.relationship_satisfaction.clamp(0.0, 100.0);
        self.alcohol_dependency = self.alcohol_dependency.clamp(0.0, 100.0);
        self.drug_dependency = self.drug_dependency.clamp(0.0, 100.0);
        self.smoking_intensity = self.smoking_intensity.clamp(0.0, 100.0);
        self.credit_score = self.credit_score.clamp(300, 850);
        self.sick_days_remaining = self.sick_days_remaining.max(0);
        self.jail_days_remaining = self.jail_days_remaining.max(0);
        self.probation_days_remaining = self.probation_days_remaining.max(0);
    }

    /// Debug-only invariant check: a bounded field outside its range after
    /// clamping is an engine bug, not a recoverable condition.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, tuning: &Tuning) {
        for (name, v) in [
            ("health", self.health),
            ("mental_health", self.mental_health),
            ("energy", self.energy),
            ("happiness", self.happiness),
            ("stress", self.stress),
            ("job_stability", self.job_stability),
            ("job_satisfaction", self.job_satisfaction),
            ("social_support", self.social_support),
            ("reputation", self.reputation),
        ] {
            debug_assert!((0.0..=100.0).contains(&v), "{name} out of range: {v}");
        }
        debug_assert!(
            (tuning.body.min_weight..=tuning.body.max_weight).contains(&self.weight),
            "weight out of range: {}",
            self.weight
        );
        debug_assert!((300..=850).contains(&self.credit_score));
        debug_assert!(self.skill_level >= 0.5);
    }
}
