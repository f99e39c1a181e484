//! The random-source seam of the data provider.
//!
//! Every randomised value on the dashboard is drawn through `RandomSource`.
//! Production code plugs in an entropy-seeded generator; tests plug in a
//! seeded generator or an `EdgeSource` stub that always answers with a range
//! bound, so structural invariants can be checked at the extremes.

/// A source of bounded random values.
///
/// Only the three primitive draws are required. The provided helpers are
/// built on `u32_in` so stub sources get consistent behaviour for free;
/// `StdRandom` overrides them with `rand`'s own samplers.
pub trait RandomSource: Send {
    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn u32_in(&mut self, low: u32, high: u32) -> u32;

    /// Uniform signed integer in `low..=high`.
    fn i32_in(&mut self, low: i32, high: i32) -> i32;

    /// Uniform float in `low..=high`.
    fn f64_in(&mut self, low: f64, high: f64) -> f64;

    /// True with probability `numerator / denominator`.
    fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        self.u32_in(1, denominator) <= numerator
    }

    /// Index into `weights`, chosen proportionally to the weight values.
    ///
    /// Returns 0 when all weights are zero.
    fn weighted_index(&mut self, weights: &[u32]) -> usize {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return 0;
        }
        let mut draw = self.u32_in(1, total);
        for (i, weight) in weights.iter().enumerate() {
            if draw <= *weight {
                return i;
            }
            draw -= weight;
        }
        weights.len() - 1
    }

    /// A random permutation of `0..len` (Fisher–Yates).
    fn shuffled_indices(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.u32_in(0, i as u32) as usize;
            indices.swap(i, j);
        }
        indices
    }
}
