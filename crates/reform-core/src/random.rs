//! `RandomSource` implementations.

use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    seq::SliceRandom,
    Rng, SeedableRng,
};

use crate::traits::RandomSource;

/// The production random source, backed by `rand`'s `StdRng`.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from operating-system entropy. Every process run differs.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn u32_in(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }

    fn i32_in(&mut self, low: i32, high: i32) -> i32 {
        self.rng.gen_range(low..=high)
    }

    fn f64_in(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }

    fn weighted_index(&mut self, weights: &[u32]) -> usize {
        // WeightedIndex rejects empty and all-zero weight lists.
        match WeightedIndex::new(weights) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => 0,
        }
    }

    fn shuffled_indices(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut self.rng);
        indices
    }
}

/// Deterministic stub that always answers with the lower or upper bound.
///
/// `EdgeSource::Low` makes every `chance` succeed and every weighted choice
/// pick the first entry; `EdgeSource::High` does the opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    Low,
    High,
}

impl RandomSource for EdgeSource {
    fn u32_in(&mut self, low: u32, high: u32) -> u32 {
        match self {
            EdgeSource::Low => low,
            EdgeSource::High => high,
        }
    }

    fn i32_in(&mut self, low: i32, high: i32) -> i32 {
        match self {
            EdgeSource::Low => low,
            EdgeSource::High => high,
        }
    }

    fn f64_in(&mut self, low: f64, high: f64) -> f64 {
        match self {
            EdgeSource::Low => low,
            EdgeSource::High => high,
        }
    }
}
