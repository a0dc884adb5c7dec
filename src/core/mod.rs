//! Core engine types: players, ids, state, actions, the store, RNG, configuration.
//!
//! Everything here is game-state plumbing. Card rules live in `effects`,
//! `combat` and `rules`, which drive the `Store` through `Action`s.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod transition;
pub mod store;
pub mod snapshot;

pub use entity::{InstanceId, Target};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::RulesConfig;
pub use action::{Action, ActionRecord, CreatureChanges};
pub use state::{GameState, Phase, PlayerState, Selection};
pub use transition::Transition;
pub use store::Store;
pub use snapshot::GameSnapshot;
