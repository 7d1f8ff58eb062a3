//! Random height generation for new nodes.

use rand_core::{RngCore, SeedableRng};

/// Draws node heights from a truncated geometric distribution.
///
/// Each coin flip takes 16 random bits and promotes the node one more level
/// while the bits fall under `probability * 0xFFFF`, so
/// `P(height > h) ≈ probability^h`, truncated at `max_level`.
#[derive(Debug, Clone)]
pub(crate) struct LevelGenerator<R> {
    rng: R,
    max_level: usize,
    threshold: u32,
}

impl<R: RngCore> LevelGenerator<R> {
    /// `probability` must lie in `(0, 1)` and `max_level` must be at least 1;
    /// callers validate through [`RankMapConfig`](crate::RankMapConfig).
    pub(crate) fn new(rng: R, max_level: usize, probability: f64) -> Self {
        debug_assert!(max_level >= 1);
        Self {
            rng,
            max_level,
            threshold: (probability * f64::from(0xFFFF_u32)) as u32,
        }
    }

    #[inline]
    pub(crate) fn max_level(&self) -> usize {
        self.max_level
    }

    /// Returns a height in `1..=max_level`.
    #[inline]
    pub(crate) fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.max_level && (self.rng.next_u32() & 0xFFFF) < self.threshold {
            level += 1;
        }
        level
    }
}

impl<R: RngCore + SeedableRng> LevelGenerator<R> {
    /// Returns a generator with the same parameters and an RNG seeded from
    /// this one.
    pub(crate) fn fork(&mut self) -> Self {
        Self {
            rng: R::from_rng(&mut self.rng),
            max_level: self.max_level,
            threshold: self.threshold,
        }
    }
}
