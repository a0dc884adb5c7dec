//! Binary snapshots.
//!
//! `GameState` is plain data, so a save is just its bincode encoding. A
//! [`GameSnapshot`] also captures the RNG position, which is what a
//! resumed game needs to make the same random choices.

use serde::{Deserialize, Serialize};

use super::rng::GameRngState;
use super::state::GameState;
use super::store::Store;
use crate::error::SnapshotError;

impl GameState {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by [`GameState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// State plus RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Capture the store's current position.
    #[must_use]
    pub fn capture(store: &Store) -> Self {
        Self {
            state: store.state().clone(),
            rng: store.rng_state(),
        }
    }

    /// Load this snapshot into `store`.
    pub fn restore_into(&self, store: &mut Store) {
        store.restore(self.state.clone(), &self.rng);
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
