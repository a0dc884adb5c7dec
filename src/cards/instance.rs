//! Card instances - runtime card state.
//!
//! `CardInstance` is one copy of a card in a game. It carries its own copy
//! of the definition (transform, silence and evolve rewrite it) plus the
//! runtime stats combat and effects change.
//!
//! ## Attack readiness
//!
//! `can_attack` is derived, never set directly. After any change it is
//! recomputed as:
//!
//! ```text
//! !has_attacked && current_attack > 0 && (!summoning_sick || charge)
//! ```

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CreatureForm};
use crate::core::action::CreatureChanges;
use crate::core::entity::InstanceId;

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this copy.
    pub instance_id: InstanceId,

    /// The card as it currently reads.
    pub card: CardDefinition,

    pub current_attack: i32,
    pub current_health: i32,
    pub max_health: i32,

    /// Derived, see the module docs.
    pub can_attack: bool,
    pub has_attacked: bool,
    pub summoning_sick: bool,

    /// Set by destroy effects; the death sweep removes marked creatures.
    pub marked_for_death: bool,
}

impl CardInstance {
    /// Create an instance with runtime fields seeded from the definition.
    #[must_use]
    pub fn new(instance_id: InstanceId, card: CardDefinition) -> Self {
        Self {
            instance_id,
            current_attack: card.attack,
            current_health: card.health,
            max_health: card.health,
            can_attack: false,
            has_attacked: false,
            summoning_sick: true,
            marked_for_death: false,
            card,
        }
    }

    #[must_use]
    pub fn card_id(&self) -> &CardId {
        &self.card.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.name
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.card.cost
    }

    #[must_use]
    pub fn armor(&self) -> u32 {
        self.card.keywords.armor()
    }

    #[must_use]
    pub fn has_guard(&self) -> bool {
        self.card.keywords.has_guard()
    }

    #[must_use]
    pub fn has_charge(&self) -> bool {
        self.card.keywords.has_charge()
    }

    #[must_use]
    pub fn is_venomous(&self) -> bool {
        self.card.keywords.is_venomous()
    }

    /// Attack as a damage amount (negative attack deals nothing).
    #[must_use]
    pub fn attack_damage(&self) -> u32 {
        self.current_attack.max(0) as u32
    }

    /// Should the death sweep remove this creature?
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current_health <= 0 || self.marked_for_death
    }

    /// Recompute `can_attack` from the other fields.
    pub fn refresh_can_attack(&mut self) {
        self.can_attack = !self.has_attacked
            && self.current_attack > 0
            && (!self.summoning_sick || self.has_charge());
    }

    /// Prepare a creature entering the board.
    pub fn enter_board(&mut self) {
        self.has_attacked = false;
        self.summoning_sick = !self.has_charge();
        self.marked_for_death = false;
        self.refresh_can_attack();
    }

    /// Start-of-turn readiness for the controller's creatures.
    pub fn ready(&mut self) {
        self.has_attacked = false;
        self.summoning_sick = false;
        self.refresh_can_attack();
    }

    /// Apply a change set, then recompute attack readiness.
    pub fn apply_changes(&mut self, changes: &CreatureChanges) {
        if let Some(card) = &changes.card {
            self.card = card.clone();
        }
        if let Some(attack) = changes.attack {
            self.current_attack = attack;
        }
        if let Some(health) = changes.health {
            self.current_health = health;
        }
        if let Some(max_health) = changes.max_health {
            self.max_health = max_health;
        }
        if let Some(has_attacked) = changes.has_attacked {
            self.has_attacked = has_attacked;
        }
        if let Some(summoning_sick) = changes.summoning_sick {
            self.summoning_sick = summoning_sick;
        }
        if let Some(marked) = changes.marked_for_death {
            self.marked_for_death = marked;
        }
        self.refresh_can_attack();
    }

    /// The card this creature becomes when transformed into `form`.
    #[must_use]
    pub fn transformed_card(&self, form: &CreatureForm) -> CardDefinition {
        let mut card = form.to_definition();
        card.id = self.card.id.clone();
        card.faction = self.card.faction;
        card.cost = self.card.cost;
        card
    }

    /// The card with every ability and keyword stripped.
    #[must_use]
    pub fn silenced_card(&self) -> CardDefinition {
        let mut card = self.card.clone();
        card.keywords.clear();
        card.abilities.clear();
        card.battlecry = None;
        card.extinct = None;
        card.evolve = None;
        card.text.clear();
        card
    }
}
