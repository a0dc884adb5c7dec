//! Instance and target identification.
//!
//! Every card that exists in a game (in a deck, hand, on the board or in the
//! graveyard) has a unique `InstanceId`. Ids are allocated by the state from
//! a monotonically increasing counter and never reused within a game, so a
//! stale id simply fails to resolve.
//!
//! ## Usage
//!
//! ```
//! use stonefire_engine::core::{InstanceId, PlayerId, Target};
//!
//! let id = InstanceId::new(7);
//! assert_eq!(id.to_string(), "card_7");
//!
//! let target = Target::creature(PlayerId::Enemy, id);
//! assert_eq!(target.player(), PlayerId::Enemy);
//! assert_eq!(target.instance(), Some(id));
//! assert!(Target::hero(PlayerId::Player).is_hero());
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card_{}", self.0)
    }
}

/// Something an attack or effect can hit: a hero or a creature on a board.
///
/// The `PlayerId` is always the side the target belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Hero(PlayerId),
    Creature(PlayerId, InstanceId),
}

impl Target {
    /// Target a player's hero.
    #[must_use]
    pub const fn hero(player: PlayerId) -> Self {
        Self::Hero(player)
    }

    /// Target a creature on `player`'s board.
    #[must_use]
    pub const fn creature(player: PlayerId, id: InstanceId) -> Self {
        Self::Creature(player, id)
    }

    /// The side this target belongs to.
    #[must_use]
    pub const fn player(self) -> PlayerId {
        match self {
            Self::Hero(player) | Self::Creature(player, _) => player,
        }
    }

    /// The creature instance, if this targets a creature.
    #[must_use]
    pub const fn instance(self) -> Option<InstanceId> {
        match self {
            Self::Hero(_) => None,
            Self::Creature(_, id) => Some(id),
        }
    }

    #[must_use]
    pub const fn is_hero(self) -> bool {
        matches!(self, Self::Hero(_))
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hero(player) => write!(f, "{}:hero", player),
            Self::Creature(player, id) => write!(f, "{}:{}", player, id),
        }
    }
}
