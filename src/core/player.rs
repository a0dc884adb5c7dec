//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Stonefire is strictly two-sided: the local `Player` and the `Enemy`.
//! Anything asymmetric between them (who goes first, opening hand sizes) is
//! decided by `RulesConfig`, not by the identifier.
//!
//! ## PlayerMap
//!
//! Two-slot storage indexed by `PlayerId`. Iteration always yields
//! `Player` before `Enemy`, which is the tie-break order used for
//! simultaneous deaths and triggers.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    Player,
    Enemy,
}

impl PlayerId {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    /// Slot index (0 for `Player`, 1 for `Enemy`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Player => 0,
            Self::Enemy => 1,
        }
    }

    /// Iterate over both sides in resolution order.
    ///
    /// ```
    /// use stonefire_engine::core::PlayerId;
    ///
    /// let sides: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(sides, vec![PlayerId::Player, PlayerId::Enemy]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::Player, Self::Enemy].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// Per-player data storage.
///
/// ## Example
///
/// ```
/// use stonefire_engine::core::{PlayerId, PlayerMap};
///
/// let mut health: PlayerMap<i32> = PlayerMap::with_value(30);
/// health[PlayerId::Enemy] -= 4;
///
/// assert_eq!(health[PlayerId::Player], 30);
/// assert_eq!(health[PlayerId::Enemy], 26);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    player: T,
    enemy: T,
}

impl<T> PlayerMap<T> {
    /// Create a PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            player: factory(PlayerId::Player),
            enemy: factory(PlayerId::Enemy),
        }
    }

    /// Create a PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        match player {
            PlayerId::Player => &self.player,
            PlayerId::Enemy => &self.enemy,
        }
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        match player {
            PlayerId::Player => &mut self.player,
            PlayerId::Enemy => &mut self.enemy,
        }
    }

    /// Iterate over (PlayerId, &T) pairs, `Player` first.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        [(PlayerId::Player, &self.player), (PlayerId::Enemy, &self.enemy)].into_iter()
    }

    /// Iterate over (PlayerId, &mut T) pairs, `Player` first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        [
            (PlayerId::Player, &mut self.player),
            (PlayerId::Enemy, &mut self.enemy),
        ]
        .into_iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
