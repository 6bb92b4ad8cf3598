//! Noise sources for table generation.
//!
//! The generator never touches a global RNG: it receives a [`NoiseSource`]
//! and takes exactly one draw per cell.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::model::NoiseRange;

/// Default seed for reproducible charts.
pub const DEFAULT_SEED: u64 = 42;

/// A source of per-cell noise draws.
pub trait NoiseSource {
    /// Draw one value from `range`, advancing the source by one step.
    fn draw(&mut self, range: NoiseRange) -> i32;
}

/// Seeded PCG noise. Same seed, same draws.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: Mcg128Xsl64,
}

impl SeededNoise {
    /// Create a source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }
}

impl Default for SeededNoise {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl NoiseSource for SeededNoise {
    fn draw(&mut self, range: NoiseRange) -> i32 {
        self.rng.gen_range(range.low..range.high)
    }
}

/// Replays a fixed sequence of draws, cycling when it runs out.
///
/// The range passed to [`NoiseSource::draw`] is ignored; an empty script
/// always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNoise {
    draws: Vec<i32>,
    next: usize,
}

impl ScriptedNoise {
    pub fn new(draws: Vec<i32>) -> Self {
        Self { draws, next: 0 }
    }

    /// A script that always yields zero.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Number of draws taken so far.
    pub fn draws_taken(&self) -> usize {
        self.next
    }
}

impl NoiseSource for ScriptedNoise {
    fn draw(&mut self, _range: NoiseRange) -> i32 {
        let value = if self.draws.is_empty() {
            0
        } else {
            self.draws[self.next % self.draws.len()]
        };
        self.next += 1;
        value
    }
}
