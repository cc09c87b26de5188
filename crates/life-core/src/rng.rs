//! Random Stream
//!
//! Seeded random number source for the simulation. Every simulation instance
//! owns exactly one stream; the order in which handlers draw from it is part
//! of the determinism contract.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors raised by weighted selection.
#[derive(Debug, Error, PartialEq)]
pub enum DistributionError {
    /// The weight vector was empty, all-zero, or contained a negative entry.
    #[error("invalid weight distribution: {0}")]
    InvalidDistribution(&'static str),
}

/// Seedable pseudo-random source supplying uniform floats, integers,
/// booleans, and weighted categorical choices.
pub struct RandomStream {
    rng: SmallRng,
    seed: u64,
}

impl RandomStream {
    /// Create a stream from an explicit seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was constructed with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[lo, hi)`.
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if lo >= hi {
            return lo;
        }
        lo + self.rng.gen::<f32>() * (hi - lo)
    }

    /// Uniform double in `[lo, hi)`, for monetary draws.
    pub fn uniform_f64(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        lo + self.rng.gen::<f64>() * (hi - lo)
    }

    /// Uniform integer in the inclusive range `[lo, hi]`.
    pub fn integer(&mut self, lo: i64, hi: i64) -> i64 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// True with probability `p` (clamped to [0, 1]).
    pub fn chance(&mut self, p: f32) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen::<f32>() < p
    }

    /// A single uniform draw in `[0, 1)`. Event tables consume exactly one
    /// of these per step and compare it against cumulative bounds.
    pub fn draw(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Weighted categorical choice over `options`.
    ///
    /// Fails with [`DistributionError::InvalidDistribution`] when the weight
    /// vector is empty, mismatched in length, all-zero, or contains a
    /// negative weight. Callers inside the simulation loop must recover by
    /// falling back to [`Self::uniform_choice`].
    pub fn weighted_choice<'a, T>(
        &mut self,
        options: &'a [T],
        weights: &[f32],
    ) -> Result<&'a T, DistributionError> {
        let index = self.weighted_index(weights)?;
        options
            .get(index)
            .ok_or(DistributionError::InvalidDistribution(
                "weights longer than options",
            ))
    }

    /// Weighted index selection; shared by [`Self::weighted_choice`].
    pub fn weighted_index(&mut self, weights: &[f32]) -> Result<usize, DistributionError> {
        if weights.is_empty() {
            return Err(DistributionError::InvalidDistribution("empty weights"));
        }
        if weights.iter().any(|w| *w < 0.0) {
            return Err(DistributionError::InvalidDistribution("negative weight"));
        }
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return Err(DistributionError::InvalidDistribution("zero total weight"));
        }

        let mut roll = self.rng.gen::<f32>() * total;
        for (i, &w) in weights.iter().enumerate() {
            roll -= w;
            if roll <= 0.0 {
                return Ok(i);
            }
        }
        // Float accumulation can leave a sliver past the last band.
        Ok(weights.len() - 1)
    }

    /// Uniform choice over `options`; the recovery path for invalid weights.
    pub fn uniform_choice<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        let index = self.rng.gen_range(0..options.len());
        &options[index]
    }
}

impl std::fmt::Debug for RandomStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomStream")
            .field("seed", &self.seed)
            .finish()
    }
}
