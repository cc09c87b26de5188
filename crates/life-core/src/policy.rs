//! Decision Policy
//!
//! Weighted-categorical choice over a category's options. Base weights are
//! adjusted by state-derived priorities (survival, happiness, career),
//! normalized to a probability distribution, and sampled through the
//! simulation's random stream. Adjustment and normalization are pure
//! functions of their inputs; only the final draw consumes randomness.

use crate::rng::RandomStream;
use crate::state::StateRecord;

/// State-derived priorities shared by every decision category. Ephemeral:
/// derived per decision call, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    /// Pressure to protect health and cash buffer, >= 0.
    pub survival: f32,
    /// Pressure to recover low happiness, >= 0.
    pub happiness: f32,
    /// Pressure to stabilize or find employment, >= 0.
    pub career: f32,
}

impl DecisionContext {
    /// Derive priorities from the current state.
    pub fn derive(state: &StateRecord) -> Self {
        let money_pressure = if state.money < 1000.0 {
            ((1000.0 - state.money) / 1000.0) as f32
        } else {
            0.0
        };
        let survival = ((30.0 - state.health) / 30.0 + money_pressure).max(0.0);
        let happiness = ((40.0 - state.happiness) / 40.0).max(0.0);
        let career = if state.has_job {
            1.0 - state.job_stability / 100.0
        } else {
            (1.0 - state.skill_level).max(0.0)
        };
        Self {
            survival,
            happiness,
            career,
        }
    }
}

/// Normalize a weight vector into a probability distribution. Negative
/// entries are floored to zero first; if the remaining sum is not positive,
/// fall back to uniform.
pub fn normalize(weights: &[f32]) -> Vec<f32> {
    let floored: Vec<f32> = weights.iter().map(|w| w.max(0.0)).collect();
    let total: f32 = floored.iter().sum();
    if total > 0.0 {
        floored.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / weights.len() as f32; weights.len()]
    }
}

/// Sample one option from adjusted weights. Invalid distributions recover
/// locally to a uniform draw; the error never reaches the simulation loop.
pub fn choose<'a, T>(rng: &mut RandomStream, options: &'a [T], weights: &[f32]) -> &'a T {
    debug_assert_eq!(options.len(), weights.len());
    let probabilities = normalize(weights);
    match rng.weighted_choice(options, &probabilities) {
        Ok(option) => option,
        Err(_) => rng.uniform_choice(options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(health: f32, happiness: f32, money: f64) -> StateRecord {
        let mut rng = RandomStream::seeded(1);
        let mut s = StateRecord::generate(&mut rng);
        s.health = health;
        s.happiness = happiness;
        s.money = money;
        s
    }

    #[test]
    fn test_survival_priority_combines_health_and_money() {
        let s = state_with(15.0, 50.0, 500.0);
        let ctx = DecisionContext::derive(&s);
        // (30-15)/30 + (1000-500)/1000 = 0.5 + 0.5
        assert!((ctx.survival - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_priorities_floor_at_zero() {
        let s = state_with(100.0, 90.0, 50_000.0);
        let ctx = DecisionContext::derive(&s);
        assert_eq!(ctx.survival, 0.0);
        assert_eq!(ctx.happiness, 0.0);
    }

    #[test]
    fn test_career_priority_switches_on_employment() {
        let mut s = state_with(80.0, 60.0, 5000.0);
        s.has_job = true;
        s.job_stability = 40.0;
        let employed = DecisionContext::derive(&s);
        assert!((employed.career - 0.6).abs() < 1e-5);

        s.has_job = false;
        s.skill_level = 0.7;
        let unemployed = DecisionContext::derive(&s);
        assert!((unemployed.career - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let n = normalize(&[10.0, 30.0, 60.0]);
        let sum: f32 = n.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!((n[2] - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_uniform_fallback() {
        let n = normalize(&[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(n, vec![0.25; 4]);
        // Negative-only vectors also fall back
        let n = normalize(&[-5.0, -1.0]);
        assert_eq!(n, vec![0.5, 0.5]);
    }

    #[test]
    fn test_degenerate_weight_is_deterministic() {
        let mut rng = RandomStream::seeded(9);
        let options = [0usize, 1, 2, 3];
        for _ in 0..100 {
            let pick = choose(&mut rng, &options, &[10.0, 0.0, 0.0, 0.0]);
            assert_eq!(*pick, 0);
        }
    }

    #[test]
    fn test_choose_with_all_zero_weights_still_returns() {
        let mut rng = RandomStream::seeded(9);
        let options = ["a", "b", "c"];
        let pick = choose(&mut rng, &options, &[0.0, 0.0, 0.0]);
        assert!(options.contains(pick));
    }

    #[test]
    fn test_choose_is_deterministic_under_seed() {
        let options = [0usize, 1, 2, 3];
        let weights = [25.0, 25.0, 25.0, 25.0];

        let mut a = RandomStream::seeded(4242);
        let picks_a: Vec<usize> = (0..50).map(|_| *choose(&mut a, &options, &weights)).collect();
        let mut b = RandomStream::seeded(4242);
        let picks_b: Vec<usize> = (0..50).map(|_| *choose(&mut b, &options, &weights)).collect();

        assert_eq!(picks_a, picks_b);
    }
}
