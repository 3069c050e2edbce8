//! Uniform random draws for position and candidate selection

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniformly distributed integers
///
/// Callable an unbounded number of times; each call is independent.
pub trait RandomSource {
    /// Uniform integer in the inclusive range `[min, max]`
    ///
    /// Returns `min` when the range is empty or degenerate.
    fn int_inclusive(&mut self, min: usize, max: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn int_inclusive(&mut self, min: usize, max: usize) -> usize {
        (**self).int_inclusive(min, max)
    }
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
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
