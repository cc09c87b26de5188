//! Tuning Configuration
//!
//! Loads simulation tuning parameters from tuning.toml so rates and penalty
//! constants can be adjusted without recompiling. The source variants of this
//! simulation disagreed on several rates (debt interest, income tax, whether
//! poverty penalties stack); those are explicit parameters here.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Errors from loading the tuning file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read tuning file: {0}")]
    Io(String),
    #[error("could not parse tuning file: {0}")]
    Parse(String),
}

/// Top-level tuning structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub finance: FinanceTuning,
    pub vitals: VitalsTuning,
    pub body: BodyTuning,
    pub illness: IllnessTuning,
    pub substances: SubstanceTuning,
    pub legal: LegalTuning,
    pub family: FamilyTuning,
    pub mortality: MortalityTuning,
}

/// Money flow parameters: daily costs, poverty penalties, monthly cycle
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FinanceTuning {
    /// Daily living cost range when money is comfortable
    pub daily_cost_min: f64,
    pub daily_cost_max: f64,
    /// Cheaper range the agent drops to when money is below the lean threshold
    pub lean_daily_cost_min: f64,
    pub lean_daily_cost_max: f64,
    /// Balance below which the lean daily-cost range applies
    pub lean_threshold: f64,

    /// Mild poverty tier threshold and per-day penalties
    pub poverty_mild_threshold: f64,
    pub poverty_mild_health: f32,
    pub poverty_mild_happiness: f32,
    /// Severe tier (negative balance) per-day penalties
    pub poverty_severe_health: f32,
    pub poverty_severe_happiness: f32,
    /// Whether the mild tier also applies on a severe-tier day. The source
    /// variants were ambiguous; the default is mutually exclusive tiers.
    pub poverty_tiers_stack: bool,

    /// Fixed monthly bills before inflation
    pub monthly_bills: f64,
    /// Monthly rent (ignored when the agent owns a home)
    pub monthly_rent: f64,
    /// Slow inflation applied to bills/rent per elapsed month
    pub monthly_inflation_rate: f64,

    /// Monthly interest rate on consumer debt (source variants: 8/12/20 %)
    pub debt_interest_rate: f64,
    /// Monthly interest rate on student loans
    pub student_loan_interest_rate: f64,
    /// Minimum student-loan payment attempted each month
    pub student_loan_min_payment: f64,
    /// Flat income tax rate on gross pay (source variants: 10/22 %)
    pub income_tax_rate: f64,
    /// Employer retirement match as a fraction of gross pay
    pub retirement_match_rate: f64,
    /// Monthly growth rate applied to retirement savings
    pub retirement_growth_rate: f64,

    /// Monthly premiums and recurring care costs
    pub insurance_premium: f64,
    pub therapy_cost: f64,
    pub medication_cost: f64,
    pub gym_cost: f64,

    /// Daily investment market fluctuation band
    pub market_drift_min: f64,
    pub market_drift_max: f64,
}

/// Natural daily drift of the bounded vitals
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VitalsTuning {
    pub health_decay: f32,
    pub happiness_decay: f32,
    pub mental_health_decay: f32,
    pub energy_recovery: f32,
    pub stress_decay: f32,
}

/// Body and calorie parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    /// Daily calorie expenditure baseline
    pub maintenance_calories: f32,
    /// kcal per kg of body mass; fixed across all source variants
    pub kcal_per_kg: f32,
    pub min_weight: f32,
    pub max_weight: f32,
}

/// Illness onset and recovery
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IllnessTuning {
    pub sick_days_min: i64,
    pub sick_days_max: i64,
    pub severity_min: f32,
    pub severity_max: f32,
    /// Chance per sick day that insurance-covered care shortens the illness
    pub insured_care_chance: f32,
    /// Chance per day that a chronic condition flares
    pub chronic_flare_chance: f32,
}

/// Substance dependency progression
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubstanceTuning {
    /// Stress level above which coping-by-substance triggers are checked
    pub coping_stress_threshold: f32,
    pub coping_chance: f32,
    pub alcohol_step: f32,
    pub drug_step: f32,
    /// Daily dependency decay while in recovery
    pub recovery_step: f32,
    pub smoking_health_cost: f32,
}

/// Traffic stops, arrests, and sentencing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LegalTuning {
    /// Chance per driving day of a traffic stop
    pub traffic_stop_chance: f32,
    /// Alcohol dependency above which a stop can become a DUI arrest
    pub dui_dependency_threshold: f32,
    pub speeding_fine_min: f64,
    pub speeding_fine_max: f64,
    pub jail_days_min: i64,
    pub jail_days_max: i64,
    pub probation_days: i64,
}

/// Family, relationship, and NPC parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FamilyTuning {
    pub starting_friends: usize,
    pub starting_npcs: usize,
    /// Age above which family members face yearly mortality checks
    pub elderly_age: f32,
    pub elderly_death_chance: f32,
    /// Daily chance a dating relationship progresses toward marriage
    pub marriage_chance: f32,
    /// Daily conception chance while married
    pub pregnancy_chance: f32,
    /// Relationship satisfaction below which breakup checks run
    pub breakup_threshold: f32,
    pub breakup_chance: f32,
}

/// Terminal condition parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MortalityTuning {
    /// Happiness below which a day counts toward the despair streak
    pub despair_happiness_threshold: f32,
    /// Consecutive despair days before giving-up checks run
    pub despair_streak_days: u32,
    pub despair_death_chance: f32,
    /// Survivable BMI band
    pub bmi_min: f32,
    pub bmi_max: f32,
    /// Dependency level above which overdose checks begin
    pub overdose_threshold: f32,
    pub overdose_chance: f32,
    /// Age at which old-age checks begin
    pub old_age_start: f32,
    pub old_age_chance: f32,
    /// Residual daily accident/violence risk
    pub base_accident_risk: f32,
    pub risky_transport_accident_risk: f32,
    pub deep_poverty_accident_risk: f32,
    /// Balance below which the deep-poverty accident risk applies
    pub deep_poverty_threshold: f64,
}

impl Tuning {
    /// Load tuning from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load tuning from the default path, falling back to defaults
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            finance: FinanceTuning::default(),
            vitals: VitalsTuning::default(),
            body: BodyTuning::default(),
            illness: IllnessTuning::default(),
            substances: SubstanceTuning::default(),
            legal: LegalTuning::default(),
            family: FamilyTuning::default(),
            mortality: MortalityTuning::default(),
        }
    }
}

impl Default for FinanceTuning {
    fn default() -> Self {
        Self {
            daily_cost_min: 50.0,
            daily_cost_max: 90.0,
            lean_daily_cost_min: 30.0,
            lean_daily_cost_max: 60.0,
            lean_threshold: 1000.0,
            poverty_mild_threshold: 500.0,
            poverty_mild_health: 0.5,
            poverty_mild_happiness: 1.2,
            poverty_severe_health: 0.8,
            poverty_severe_happiness: 4.0,
            poverty_tiers_stack: false,
            monthly_bills: 1400.0,
            monthly_rent: 1100.0,
            monthly_inflation_rate: 0.002,
            debt_interest_rate: 0.08,
            student_loan_interest_rate: 0.005,
            student_loan_min_payment: 250.0,
            income_tax_rate: 0.10,
            retirement_match_rate: 0.05,
            retirement_growth_rate: 0.004,
            insurance_premium: 300.0,
            therapy_cost: 400.0,
            medication_cost: 120.0,
            gym_cost: 45.0,
            market_drift_min: -0.010,
            market_drift_max: 0.012,
        }
    }
}

impl Default for VitalsTuning {
    fn default() -> Self {
        Self {
            health_decay: 0.02,
            happiness_decay: 0.1,
            mental_health_decay: 0.05,
            energy_recovery: 45.0,
            stress_decay: 1.0,
        }
    }
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            maintenance_calories: 2500.0,
            kcal_per_kg: 7700.0,
            min_weight: 40.0,
            max_weight: 200.0,
        }
    }
}

impl Default for IllnessTuning {
    fn default() -> Self {
        Self {
            sick_days_min: 4,
            sick_days_max: 18,
            severity_min: 4.0,
            severity_max: 9.0,
            insured_care_chance: 0.6,
            chronic_flare_chance: 0.03,
        }
    }
}

impl Default for SubstanceTuning {
    fn default() -> Self {
        Self {
            coping_stress_threshold: 70.0,
            coping_chance: 0.12,
            alcohol_step: 1.5,
            drug_step: 2.0,
            recovery_step: 0.8,
            smoking_health_cost: 0.06,
        }
    }
}

impl Default for LegalTuning {
    fn default() -> Self {
        Self {
            traffic_stop_chance: 0.008,
            dui_dependency_threshold: 40.0,
            speeding_fine_min: 90.0,
            speeding_fine_max: 350.0,
            jail_days_min: 10,
            jail_days_max: 90,
            probation_days: 180,
        }
    }
}

impl Default for FamilyTuning {
    fn default() -> Self {
        Self {
            starting_friends: 3,
            starting_npcs: 6,
            elderly_age: 75.0,
            elderly_death_chance: 0.08,
            marriage_chance: 0.002,
            pregnancy_chance: 0.001,
            breakup_threshold: 25.0,
            breakup_chance: 0.04,
        }
    }
}

impl Default for MortalityTuning {
    fn default() -> Self {
        Self {
            despair_happiness_threshold: 15.0,
            despair_streak_days: 8,
            despair_death_chance: 0.15,
            bmi_min: 12.0,
            bmi_max: 60.0,
            overdose_threshold: 85.0,
            overdose_chance: 0.01,
            old_age_start: 80.0,
            old_age_chance: 0.002,
            base_accident_risk: 0.002,
            risky_transport_accident_risk: 0.012,
            deep_poverty_accident_risk: 0.01,
            deep_poverty_threshold: 200.0,
        }
    }
}

/// Optional subsystems, chosen at construction time rather than probed at
/// runtime. A disabled subsystem's handler is simply never invoked.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    pub illness: bool,
    pub substances: bool,
    pub legal: bool,
    pub family: bool,
    pub market: bool,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            illness: true,
            substances: true,
            legal: true,
            family: true,
            market: true,
        }
    }
}

impl FeatureSet {
    /// The engine core only: no optional subsystems.
    pub fn minimal() -> Self {
        Self {
            illness: false,
            substances: false,
            legal: false,
            family: false,
            market: false,
        }
    }
}

/// Everything needed to construct a simulation instance.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    pub tuning: Tuning,
    pub features: FeatureSet,
}

impl SimConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tuning: Tuning::default(),
            features: FeatureSet::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }
}
