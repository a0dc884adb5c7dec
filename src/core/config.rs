//! Rules configuration.
//!
//! `RulesConfig` holds every numeric rule of the game: starting health,
//! opening hand sizes, mana, board and hand caps, plus the safety bounds
//! on trigger recursion and the death sweep.
//!
//! ## Loading
//!
//! Configs deserialize from JSON. Missing fields take their default, so a
//! config file only needs to name what it changes:
//!
//! ```
//! use stonefire_engine::core::RulesConfig;
//!
//! let config = RulesConfig::from_json(r#"{ "starting_health": 20 }"#).unwrap();
//! assert_eq!(config.starting_health, 20);
//! assert_eq!(config.max_board_size, 7);
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::error::CatalogError;

/// Numeric rules and safety bounds for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Hero health at game start.
    pub starting_health: i32,

    /// Side that takes the first turn.
    pub first_player: PlayerId,

    /// Opening hand for the side that goes first.
    pub first_hand_size: usize,

    /// Opening hand for the side that goes second.
    pub second_hand_size: usize,

    /// Mana crystal cap.
    pub max_mana: u32,

    /// Creatures allowed on one board.
    pub max_board_size: usize,

    /// Cards allowed in one hand. Draws beyond this are burned.
    pub max_hand_size: usize,

    /// Deepest allowed chain of triggered abilities.
    pub max_trigger_depth: u32,

    /// Death sweep passes before forced cleanup.
    pub max_death_passes: u32,

    /// Run `check_evolve` after every play and attack.
    pub auto_evolve: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_health: 30,
            first_player: PlayerId::Player,
            first_hand_size: 3,
            second_hand_size: 4,
            max_mana: 10,
            max_board_size: 7,
            max_hand_size: 10,
            max_trigger_depth: 16,
            max_death_passes: 64,
            auto_evolve: true,
        }
    }
}

impl RulesConfig {
    /// Create the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON, defaulting missing fields.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Opening hand size for a side.
    #[must_use]
    pub fn opening_hand(&self, player: PlayerId) -> usize {
        if player == self.first_player {
            self.first_hand_size
        } else {
            self.second_hand_size
        }
    }

    /// Set the starting hero health.
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set who goes first.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Set both opening hand sizes.
    #[must_use]
    pub fn with_opening_hands(mut self, first: usize, second: usize) -> Self {
        self.first_hand_size = first;
        self.second_hand_size = second;
        self
    }

    /// Set the board cap.
    #[must_use]
    pub fn with_max_board_size(mut self, size: usize) -> Self {
        self.max_board_size = size;
        self
    }

    /// Set the hand cap.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the trigger recursion bound.
    #[must_use]
    pub fn with_max_trigger_depth(mut self, depth: u32) -> Self {
        self.max_trigger_depth = depth;
        self
    }

    /// Set the death sweep pass bound.
    #[must_use]
    pub fn with_max_death_passes(mut self, passes: u32) -> Self {
        self.max_death_passes = passes;
        self
    }

    /// Enable or disable automatic evolve checks.
    #[must_use]
    pub fn with_auto_evolve(mut self, enabled: bool) -> Self {
        self.auto_evolve = enabled;
        self
    }
}
