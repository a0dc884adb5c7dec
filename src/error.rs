//! Error types.
//!
//! - `ActionError`: an action or command was rejected. State is unchanged.
//! - `CatalogError`: card data or rules config could not be loaded.
//! - `SnapshotError`: a binary snapshot could not be encoded or decoded.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{InstanceId, PlayerId, Target};

/// Why an action was rejected.
///
/// Invalid moves are common (AI probing, UI clicks), so they are plain
/// values rather than panics.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{0} is not in hand")]
    CardNotInHand(InstanceId),

    #[error("not enough mana: costs {cost}, {available} available")]
    InsufficientMana { cost: u32, available: u32 },

    #[error("the board is full")]
    BoardFull,

    #[error("this card requires a target")]
    TargetRequired,

    #[error("{0} is not a valid target")]
    InvalidTarget(Target),

    #[error("a guard creature must be targeted first")]
    GuardPriority,

    #[error("attacker {0} is not on the board")]
    AttackerNotFound(InstanceId),

    #[error("{0} cannot attack right now")]
    CannotAttack(InstanceId),

    #[error("trigger chain exceeded depth {0}")]
    TriggerDepthExceeded(u32),
}

/// Errors raised while loading the card catalog or rules config.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown keyword `{0}`")]
    UnknownKeyword(String),

    #[error("unknown target selector `{0}`")]
    UnknownSelector(String),

    #[error("card {0} is registered twice")]
    DuplicateCard(CardId),

    #[error("card {0} is not in the catalog")]
    UnknownCard(CardId),

    #[error("card {id} is invalid: {reason}")]
    InvalidCard { id: CardId, reason: String },
}

/// Errors raised by the binary snapshot codec.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] bincode::Error),
}
