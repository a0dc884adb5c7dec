//! Triggered abilities.
//!
//! A `TriggeredAbility` is a standing rule printed on a creature: "at the
//! end of your turn, restore 1 health". While the creature is on the board,
//! the effect interpreter matches every `TriggerEvent` against it.

use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, PlayerId, Target};
use crate::effects::Effect;

/// Occurrences a triggered ability can listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trigger {
    TurnStart,
    TurnEnd,
    /// Only fires for the creature that took the damage.
    TakesDamage,
    CardDrawn,
    CreatureSummoned,
}

/// Controller filter on a triggered ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerPlayer {
    /// The occurrence must belong to the ability's controller.
    #[serde(rename = "self")]
    Owner,
    /// The occurrence must belong to the other side.
    Opponent,
}

/// A trigger occurrence produced while resolving an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub trigger: Trigger,

    /// The side the occurrence belongs to: whose turn, who drew, whose
    /// creature was summoned or damaged.
    pub player: PlayerId,

    /// The creature the occurrence is about (drawn card, summoned or
    /// damaged creature).
    pub subject: Option<InstanceId>,

    /// Who dealt the damage, for `TakesDamage`.
    pub attacker: Option<Target>,
}

impl TriggerEvent {
    #[must_use]
    pub fn new(trigger: Trigger, player: PlayerId) -> Self {
        Self {
            trigger,
            player,
            subject: None,
            attacker: None,
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: InstanceId) -> Self {
        self.subject = Some(subject);
        self
    }

    #[must_use]
    pub fn with_attacker(mut self, attacker: Target) -> Self {
        self.attacker = Some(attacker);
        self
    }
}

/// A standing ability on a creature.
///
/// ## Example
///
/// ```
/// use stonefire_engine::core::{InstanceId, PlayerId};
/// use stonefire_engine::effects::{Effect, Selector};
/// use stonefire_engine::triggers::{Trigger, TriggerEvent, TriggeredAbility};
///
/// // "At the end of your turn, restore 1 health."
/// let ability = TriggeredAbility::new(Trigger::TurnEnd, Effect::heal(Selector::Source, 1)).for_owner();
///
/// let mine = TriggerEvent::new(Trigger::TurnEnd, PlayerId::Player);
/// let theirs = TriggerEvent::new(Trigger::TurnEnd, PlayerId::Enemy);
///
/// assert!(ability.matches(&mine, PlayerId::Player, InstanceId::new(3)));
/// assert!(!ability.matches(&theirs, PlayerId::Player, InstanceId::new(3)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredAbility {
    pub trigger: Trigger,

    /// `None` fires for either side.
    #[serde(default)]
    pub trigger_player: Option<TriggerPlayer>,

    pub effect: Effect,
}

impl TriggeredAbility {
    /// Create an ability that fires for either side.
    #[must_use]
    pub fn new(trigger: Trigger, effect: Effect) -> Self {
        Self {
            trigger,
            trigger_player: None,
            effect,
        }
    }

    /// Only fire for the controller's own occurrences.
    #[must_use]
    pub fn for_owner(mut self) -> Self {
        self.trigger_player = Some(TriggerPlayer::Owner);
        self
    }

    /// Only fire for the opponent's occurrences.
    #[must_use]
    pub fn for_opponent(mut self) -> Self {
        self.trigger_player = Some(TriggerPlayer::Opponent);
        self
    }

    /// Does this ability, on creature `source` controlled by `controller`,
    /// respond to `event`?
    #[must_use]
    pub fn matches(&self, event: &TriggerEvent, controller: PlayerId, source: InstanceId) -> bool {
        if self.trigger != event.trigger {
            return false;
        }
        if self.trigger == Trigger::TakesDamage && event.subject != Some(source) {
            return false;
        }
        match self.trigger_player {
            None => true,
            Some(TriggerPlayer::Owner) => event.player == controller,
            Some(TriggerPlayer::Opponent) => event.player != controller,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Selector;

    fn ability(trigger: Trigger) -> TriggeredAbility {
        TriggeredAbility::new(trigger, Effect::draw(1))
    }

    #[test]
    fn test_trigger_kind_must_match() {
        let event = TriggerEvent::new(Trigger::TurnStart, PlayerId::Player);
        assert!(ability(Trigger::TurnStart).matches(&event, PlayerId::Enemy, InstanceId::new(1)));
        assert!(!ability(Trigger::TurnEnd).matches(&event, PlayerId::Enemy, InstanceId::new(1)));
    }

    #[test]
    fn test_controller_filters() {
        let event = TriggerEvent::new(Trigger::CardDrawn, PlayerId::Enemy);
        let source = InstanceId::new(1);

        assert!(ability(Trigger::CardDrawn).for_owner().matches(&event, PlayerId::Enemy, source));
        assert!(!ability(Trigger::CardDrawn).for_owner().matches(&event, PlayerId::Player, source));
        assert!(ability(Trigger::CardDrawn).for_opponent().matches(&event, PlayerId::Player, source));
        assert!(!ability(Trigger::CardDrawn).for_opponent().matches(&event, PlayerId::Enemy, source));
    }

    #[test]
    fn test_takes_damage_scoped_to_subject() {
        let event = TriggerEvent::new(Trigger::TakesDamage, PlayerId::Player)
            .with_subject(InstanceId::new(5))
            .with_attacker(Target::creature(PlayerId::Enemy, InstanceId::new(9)));

        let armor_up = TriggeredAbility::new(Trigger::TakesDamage, Effect::buff(Selector::Source, 1, 0));
        assert!(armor_up.matches(&event, PlayerId::Player, InstanceId::new(5)));
        assert!(!armor_up.matches(&event, PlayerId::Player, InstanceId::new(6)));
    }

    #[test]
    fn test_catalog_json_shape() {
        let json = r#"{ "trigger": "TURN_END", "trigger_player": "self",
                        "effect": { "heal": { "target": "self", "amount": 1 } } }"#;
        let parsed: TriggeredAbility = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.trigger, Trigger::TurnEnd);
        assert_eq!(parsed.trigger_player, Some(TriggerPlayer::Owner));
        assert_eq!(parsed.effect, Effect::heal(Selector::Source, 1));
    }
}
