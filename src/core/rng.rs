//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Fair shuffles**: Fisher–Yates over a ChaCha8 stream
//! - **Inclusive ranges**: Wild bonuses and opponent play counts are drawn
//!   from closed ranges like `1..=10`
//!
//! ```
//! use card_duel::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let bonus = rng.gen_inclusive(1, 10);
//! assert!((1..=10).contains(&bonus));
//!
//! // Same seed, same sequence
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_inclusive(0, 1000), b.gen_inclusive(0, 1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing every random decision in a game.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a uniform integer in `low..=high`.
    ///
    /// Panics if `low > high`.
    pub fn gen_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.inner.gen_range(low..=high)
    }

    /// Shuffle a slice in place.
    ///
    /// `SliceRandom::shuffle` is a Fisher–Yates pass, so every permutation
    /// is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
