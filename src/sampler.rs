//! Seeded binomial pool generation
//!
//! The sampler owns a single generator seeded with [`SEED`]. Every call to
//! [`Sampler::draw_pool`] continues the same stream, so a session replays
//! identically from start to finish.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Binomial, Distribution};
use thiserror::Error;

/// Hard cap on the number of simulations, and the default pool size
pub const MAX_SIMULATIONS: usize = 1_000_000;

/// Seed of the session generator
pub const SEED: u64 = 1;

/// Errors that can occur while drawing outcomes
#[derive(Error, Debug, PartialEq)]
pub enum SamplerError {
    #[error("Invalid binomial parameters n={sample_size}, p={probability}: {reason}")]
    InvalidParameters {
        sample_size: u64,
        probability: f64,
        reason: String,
    },

    #[error("Pool capacity must be at least 1")]
    EmptyPool,
}

/// Draws pools of binomial outcomes from one seeded generator
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
    capacity: usize,
}

impl Sampler {
    /// Create a sampler producing pools of [`MAX_SIMULATIONS`] outcomes
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(SEED),
            capacity: MAX_SIMULATIONS,
        }
    }

    /// Create a sampler with a smaller pool, capped at [`MAX_SIMULATIONS`]
    pub fn with_capacity(capacity: usize) -> Result<Self, SamplerError> {
        if capacity == 0 {
            return Err(SamplerError::EmptyPool);
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(SEED),
            capacity: capacity.min(MAX_SIMULATIONS),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Draw `capacity` outcomes of binomial(`sample_size`, `probability`)
    pub fn draw_pool(
        &mut self,
        sample_size: u64,
        probability: f64,
    ) -> Result<Vec<u64>, SamplerError> {
        let binomial = Binomial::new(sample_size, probability).map_err(|e| {
            SamplerError::InvalidParameters {
                sample_size,
                probability,
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(
            sample_size,
            probability,
            capacity = self.capacity,
            "drawing binomial pool"
        );

        Ok(binomial
            .sample_iter(&mut self.rng)
            .take(self.capacity)
            .collect())
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
