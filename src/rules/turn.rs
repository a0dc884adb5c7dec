//! Turn state machine.
//!
//! The state is never stored; it is read off the snapshot, so it cannot
//! drift from the game it describes.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Phase, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingPlayerTurn,
    PlayerActing,
    AwaitingEnemyTurn,
    EnemyActing,
    /// Terminal. Only a new game leaves it.
    GameOver,
}

impl TurnState {
    /// Derive the turn state from a snapshot.
    ///
    /// Before the first turn, and after a turn has ended but before the
    /// next one started, the game is waiting on the player whose turn is
    /// next.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        if state.game_over {
            return Self::GameOver;
        }
        if state.turn == 0 {
            return Self::awaiting(state.active_player);
        }
        match state.phase {
            Phase::End => Self::awaiting(state.active_player.opponent()),
            Phase::Main | Phase::Combat => Self::acting(state.active_player),
        }
    }

    const fn awaiting(player: PlayerId) -> Self {
        match player {
            PlayerId::Player => Self::AwaitingPlayerTurn,
            PlayerId::Enemy => Self::AwaitingEnemyTurn,
        }
    }

    const fn acting(player: PlayerId) -> Self {
        match player {
            PlayerId::Player => Self::PlayerActing,
            PlayerId::Enemy => Self::EnemyActing,
        }
    }

    /// The player who may play cards and attack, if anyone.
    #[must_use]
    pub const fn acting_player(self) -> Option<PlayerId> {
        match self {
            Self::PlayerActing => Some(PlayerId::Player),
            Self::EnemyActing => Some(PlayerId::Enemy),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver)
    }
}
