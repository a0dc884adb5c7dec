//! Primitive store actions.
//!
//! Each `Action` is one minimal, validated mutation of `GameState`.
//! Composite operations ("play a creature and resolve its battlecry") are
//! sequences of actions issued by the turn controller, never one action.
//!
//! Actions carry everything needed to apply them: random choices (deck
//! order, random targets) are made before dispatch, so replaying a list of
//! `ActionRecord`s reproduces a game without the RNG.

use serde::{Deserialize, Serialize};

use super::entity::{InstanceId, Target};
use super::player::PlayerId;
use super::state::Selection;
use crate::cards::CardDefinition;

/// A single state transition request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Reset to a fresh game with the given decks (front is drawn first).
    StartGame {
        player_deck: Vec<CardDefinition>,
        enemy_deck: Vec<CardDefinition>,
    },

    /// Refresh mana and creatures for `player` and make them active.
    StartTurn { player: PlayerId },

    /// Move the active turn into its end phase.
    EndTurn,

    /// Draw the front card of `player`'s deck.
    DrawCard { player: PlayerId },

    /// Pay for a card and move it out of hand.
    PlayCard {
        player: PlayerId,
        instance_id: InstanceId,
        target: Option<Target>,
    },

    /// Spend a creature's attack for this turn.
    Attack { player: PlayerId, attacker: InstanceId },

    /// Damage a hero or creature. Creature armor is applied here.
    DealDamage { target: Target, amount: u32 },

    /// Restore health to a hero or creature.
    Heal { target: Target, amount: u32 },

    /// Move a creature from the board to the graveyard.
    DestroyCreature { player: PlayerId, instance_id: InstanceId },

    /// Create a new creature on `player`'s board.
    SummonCreature { player: PlayerId, card: CardDefinition },

    /// Overwrite runtime fields of a creature on the board.
    ModifyCreature {
        player: PlayerId,
        instance_id: InstanceId,
        changes: CreatureChanges,
    },

    /// Set current and/or maximum mana.
    ModifyMana {
        player: PlayerId,
        current: Option<u32>,
        max: Option<u32>,
    },

    /// End the game.
    SetGameOver { winner: PlayerId },

    /// Record a UI selection.
    SetSelection { selection: Selection },

    ClearSelection,
}

impl Action {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartGame { .. } => "start_game",
            Self::StartTurn { .. } => "start_turn",
            Self::EndTurn => "end_turn",
            Self::DrawCard { .. } => "draw_card",
            Self::PlayCard { .. } => "play_card",
            Self::Attack { .. } => "attack",
            Self::DealDamage { .. } => "deal_damage",
            Self::Heal { .. } => "heal",
            Self::DestroyCreature { .. } => "destroy_creature",
            Self::SummonCreature { .. } => "summon_creature",
            Self::ModifyCreature { .. } => "modify_creature",
            Self::ModifyMana { .. } => "modify_mana",
            Self::SetGameOver { .. } => "set_game_over",
            Self::SetSelection { .. } => "set_selection",
            Self::ClearSelection => "clear_selection",
        }
    }
}

/// A typed set of creature field overwrites. `None` leaves a field alone.
///
/// `can_attack` is not settable: it is recomputed after every change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureChanges {
    pub attack: Option<i32>,
    pub health: Option<i32>,
    pub max_health: Option<i32>,
    pub has_attacked: Option<bool>,
    pub summoning_sick: Option<bool>,
    pub marked_for_death: Option<bool>,
    /// Replace the creature's card text, stats template and keywords.
    pub card: Option<CardDefinition>,
}

impl CreatureChanges {
    /// Create an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attack(mut self, attack: i32) -> Self {
        self.attack = Some(attack);
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    #[must_use]
    pub fn with_max_health(mut self, max_health: i32) -> Self {
        self.max_health = Some(max_health);
        self
    }

    #[must_use]
    pub fn with_has_attacked(mut self, has_attacked: bool) -> Self {
        self.has_attacked = Some(has_attacked);
        self
    }

    #[must_use]
    pub fn with_summoning_sick(mut self, sick: bool) -> Self {
        self.summoning_sick = Some(sick);
        self
    }

    #[must_use]
    pub fn marked_for_death(mut self) -> Self {
        self.marked_for_death = Some(true);
        self
    }

    #[must_use]
    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.card = Some(card);
        self
    }

    /// Does this change set touch anything?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A dispatched action with its position in the game.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Position in the store's history (0-based).
    pub sequence: u32,

    /// Turn number when the action was applied.
    pub turn: u32,

    /// The action taken.
    pub action: Action,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(sequence: u32, turn: u32, action: Action) -> Self {
        Self { sequence, turn, action }
    }
}
