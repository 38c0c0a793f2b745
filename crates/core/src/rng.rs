//! RNG module - injectable randomness for tile spawning
//!
//! Tile spawning is the only non-deterministic step in the game, so every
//! random draw goes through the [`RandomSource`] trait. Two sources ship:
//!
//! - [`SimpleRng`]: a tiny LCG for deterministic tests and replays
//! - [`ChaChaSource`]: ChaCha8, seeded explicitly or from OS entropy

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed random numbers.
pub trait RandomSource {
    /// Next uniformly distributed u32.
    fn next_u32(&mut self) -> u32;

    /// Uniform index in `[0, len)`.
    ///
    /// Uses the widening-multiply reduction so low-quality low bits (LCG) do
    /// not bias the result. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index on empty range");
        ((self.next_u32() as u64 * len as u64) >> 32) as usize
    }

    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state (restarting from it replays the same sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// ChaCha8-backed source for interactive play.
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    inner: ChaCha8Rng,
}

impl ChaChaSource {
    /// Deterministic stream for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fresh stream seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}
