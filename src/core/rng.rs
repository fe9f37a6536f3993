//! Seeded randomness for dice, random seats, and episode seeds.
//!
//! A game never shares one stream between concerns. The dice draw from the
//! `"dice"` stream of the game seed, `Random` seats from the `"strategy"`
//! stream, and an environment hands out episode seeds from its
//! `"episodes"` stream. Changing how a seat decides therefore never changes
//! the rolls of a replay.
//!
//! ```
//! use ashtachamma::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut dice = root.for_context("dice");
//! let mut again = GameRng::new(42).for_context("dice");
//! assert_eq!(dice.gen_range_usize(0..100), again.gen_range_usize(0..100));
//! ```

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// ChaCha8 stream that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a named stream from this stream's seed.
    ///
    /// Depends only on the seed and the name, not on how much of this
    /// stream was already consumed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Draw a seed for the next episode.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniform pick from `slice`, `None` when it is empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Index drawn from a prepared weighted table.
    pub fn sample_weighted(&mut self, dist: &WeightedIndex<u32>) -> usize {
        dist.sample(&mut self.inner)
    }

    /// Position in the stream, for checkpointing a game mid-episode.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream exactly where [`state`](Self::state) left it.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }
}

/// Serializable stream position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
}
