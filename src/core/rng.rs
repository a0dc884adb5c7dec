//! Seeded randomness for shuffles and random targets.
//!
//! A game owns exactly one `GameRng`, held by the `Store`. Everything
//! random in Stonefire (deck order, `random_enemy` and friends) draws from
//! it in a fixed order, so a seed plus a command sequence is a full replay.
//!
//! ```
//! use stonefire_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let saved = rng.state();
//! let first = rng.pick_index(7);
//!
//! let mut resumed = GameRng::from_state(&saved);
//! assert_eq!(resumed.pick_index(7), first);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The game's random source. ChaCha8 keyed by a `u64` seed.
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

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A uniform index into a pool of `len` items, `None` for an empty pool.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Shuffle cards (or anything else) in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// A uniform pick from `pool`.
    pub fn choose<'a, T>(&mut self, pool: &'a [T]) -> Option<&'a T> {
        pool.choose(&mut self.inner)
    }

    /// Where the stream is now.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            position: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream saved with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.position);
        Self { inner, seed: state.seed }
    }
}

/// A saved RNG position: the seed and how far into its stream the game
/// has read. Restoring costs the same however long the game has run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub position: u128,
}
