//! Injectable random sources
//!
//! The simulation never owns its RNG. Production code passes a seeded
//! [`SeededRandom`]; tests pass a [`SequenceRandom`] to script exact draws.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform random samples
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[low, high)`; returns `low` when the range is empty
    fn range_i32(&mut self, low: i32, high: i32) -> i32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        (**self).range_i32(low, high)
    }
}

/// Deterministic PCG-backed random source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with (for replays)
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }
}

/// Replays a fixed list of samples in order, cycling when exhausted
///
/// Integer draws map the next sample onto the requested range, so `0.0` picks
/// `low` and values just under `1.0` pick `high - 1`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    samples: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        let samples: Vec<f64> = samples.into();
        Self {
            samples: samples.into_iter().map(|s| s.clamp(0.0, 0.999_999)).collect(),
            cursor: 0,
        }
    }

    /// A source that always returns the same sample
    pub fn constant(sample: f64) -> Self {
        Self::new(vec![sample])
    }

    /// Number of samples drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }

    fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        let sample = self.next_f64();
        if high <= low {
            return low;
        }
        let span = (high - low) as f64;
        low + ((sample * span) as i32).min(high - low - 1)
    }
}
