//! Deterministic random number generation.
//!
//! The rules engine never draws randomness itself. `GameRng` serves the
//! collaborators around it: the deck shuffle and the randomized AI.
//!
//! ## Streams
//!
//! ```
//! use emuni::core::GameRng;
//!
//! let rng = GameRng::new(42);
//!
//! // Independent, reproducible streams for separate purposes
//! let mut shuffle = rng.for_context("shuffle");
//! let mut ai = rng.for_context("ai");
//!
//! let mut again = GameRng::new(42).for_context("shuffle");
//! assert_eq!(shuffle.gen_bool(0.5), again.gen_bool(0.5));
//! # let _ = ai.gen_bool(0.5);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Seeded ChaCha8 RNG.
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

    /// Derive a stream for a named purpose.
    ///
    /// The same context always yields the same stream for the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Return true with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
