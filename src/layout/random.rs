//! Seeded and entropy-backed unit random sources

use crate::io::configuration::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Source of uniformly distributed values in `[0, 1)`
pub trait RandomSource {
    /// Draw the next value
    fn next_unit(&mut self) -> f64;
}

/// Linear congruential generator used for reproducible layouts
///
/// `state = (state * 9301 + 49297) mod 233280`, output `state / 233280`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    /// Create a generator from any seed
    ///
    /// The seed is reduced modulo the LCG modulus first, which leaves the
    /// sequence unchanged while keeping the arithmetic inside `u64`.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed % LCG_MODULUS,
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

/// Non-deterministic source for one-off "randomize" actions
pub struct EntropySource {
    rng: ThreadRng,
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource {
    /// Create a source backed by the thread-local generator
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl RandomSource for EntropySource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Turn one draw from `random` into a layout seed
///
/// Seeds are reduced modulo the LCG modulus anyway, so every distinct layout
/// is reachable from `[0, 233280)`.
pub fn seed_from(random: &mut impl RandomSource) -> u64 {
    ((random.next_unit() * LCG_MODULUS as f64) as u64).min(LCG_MODULUS - 1)
}

/// Draw a fresh layout seed for a "randomize" action
pub fn random_seed() -> u64 {
    seed_from(&mut EntropySource::new())
}
