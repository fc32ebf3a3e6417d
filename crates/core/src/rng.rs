//! RNG module - deterministic random streams
//!
//! Implements the Lehmer "minimal standard" generator (`minstd_rand`):
//! `state = state * 48271 mod (2^31 - 1)`. Every stream in the game (colors,
//! arrow models, board models, hidden board order) is derived from a single
//! level seed, so the same seed reproduces the same content.
//!
//! Deriving a stream consumes one value from the parent, which makes the
//! derivation order part of the reproducibility contract.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seed type for random streams
pub type Seed = u32;

const MULTIPLIER: u64 = 48_271;
const MODULUS: u64 = 2_147_483_647;

/// Largest value returned by [`Rng::next_u32`]
pub const RNG_MAX: u32 = (MODULUS - 1) as u32;

/// Deterministic pseudo-random stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Create a new stream with the given seed
    pub fn new(seed: Seed) -> Self {
        // A zero state would stay zero forever
        let state = (seed as u64 % MODULUS) as u32;
        let state = if state == 0 { 1 } else { state };
        Self { state }
    }

    /// Create a stream seeded from the system clock
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(1);
        Self::new(nanos as u32 ^ (nanos >> 32) as u32)
    }

    /// Generate next value in `[1, RNG_MAX]`
    pub fn next_u32(&mut self) -> u32 {
        self.state = ((self.state as u64 * MULTIPLIER) % MODULUS) as u32;
        self.state
    }

    /// Generate a value in `[min(a, b), max(a, b))`
    ///
    /// An empty range returns its lower bound without consuming the stream.
    pub fn range(&mut self, a: u32, b: u32) -> u32 {
        let lo = a.min(b);
        let hi = a.max(b);
        if lo == hi {
            return lo;
        }
        (self.next_u32() % (hi - lo)) + lo
    }

    /// Generate a value in `[0, max)`
    pub fn below(&mut self, max: u32) -> u32 {
        self.range(0, max)
    }

    /// Generate a float in `[0, 1]`
    pub fn random_float(&mut self) -> f32 {
        self.next_u32() as f32 / RNG_MAX as f32
    }

    /// Draw a seed for a new stream
    pub fn random_seed(&mut self) -> Seed {
        self.next_u32()
    }

    /// Derive an independent stream, consuming one value of this one
    pub fn derive(&mut self) -> Rng {
        Rng::new(self.random_seed())
    }

    /// Reorder `items` by repeatedly moving a random remaining element to the output
    pub fn take_in_random_order<T>(&mut self, items: Vec<T>) -> Vec<T> {
        let mut remaining = items;
        let mut ordered = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let index = self.below(remaining.len() as u32) as usize;
            ordered.push(remaining.remove(index));
        }
        ordered
    }

    /// Current internal state (for restarting a stream at the same point)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(1)
    }
}
