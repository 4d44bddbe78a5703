//! Random draws and substring helpers used by the retrieval pipeline.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`, both ends inclusive. Returns `min` when `max < min`.
    fn int_inclusive(&mut self, min: usize, max: usize) -> usize;
}

/// Default random source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for RandomSelector {
    fn int_inclusive(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Byte offset of the `n`-th (1-based) occurrence of `needle` in `haystack`.
///
/// `n == 0` yields 0 and a missing occurrence yields `haystack.len()`, so the
/// result is always a valid slice bound.
pub fn nth_occurrence(haystack: &str, needle: &str, n: usize) -> usize {
    if n == 0 || needle.is_empty() {
        return 0;
    }
    haystack
        .match_indices(needle)
        .nth(n - 1)
        .map(|(pos, _)| pos)
        .unwrap_or(haystack.len())
}
