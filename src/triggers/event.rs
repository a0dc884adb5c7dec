//! Observation events.
//!
//! Every meaningful occurrence in a game is announced as a `GameEvent`.
//! Each variant has a stable upper-snake name (`"CREATURE_DIED"`) through
//! its `EventKind`, which is also what bus subscriptions filter on.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{InstanceId, PlayerId, Target};

/// Event kind, used to filter subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    // === Game lifecycle ===
    GameStarted,
    TurnStarted,
    TurnEnded,
    GameOver,

    // === Cards and creatures ===
    CardPlayed,
    SpellCast,
    RelicPlayed,
    CardDrawn,
    CardBurned,
    CreatureSummoned,
    CreatureDied,
    CreatureEvolved,

    // === Combat ===
    AttackStarted,
    CombatResolved,
    DamageDealt,
    HeroDamaged,
    HealApplied,
    VenomousTriggered,

    // === Effects ===
    EffectDamage,
    EffectHeal,
    EffectBuff,
    EffectDebuff,
    EffectDraw,
    EffectDestroy,
    EffectSilence,
    EffectTransform,
    EffectMana,
}

impl EventKind {
    /// Stable upper-snake event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GameStarted => "GAME_STARTED",
            Self::TurnStarted => "TURN_STARTED",
            Self::TurnEnded => "TURN_ENDED",
            Self::GameOver => "GAME_OVER",
            Self::CardPlayed => "CARD_PLAYED",
            Self::SpellCast => "SPELL_CAST",
            Self::RelicPlayed => "RELIC_PLAYED",
            Self::CardDrawn => "CARD_DRAWN",
            Self::CardBurned => "CARD_BURNED",
            Self::CreatureSummoned => "CREATURE_SUMMONED",
            Self::CreatureDied => "CREATURE_DIED",
            Self::CreatureEvolved => "CREATURE_EVOLVED",
            Self::AttackStarted => "ATTACK_STARTED",
            Self::CombatResolved => "COMBAT_RESOLVED",
            Self::DamageDealt => "DAMAGE_DEALT",
            Self::HeroDamaged => "HERO_DAMAGED",
            Self::HealApplied => "HEAL_APPLIED",
            Self::VenomousTriggered => "VENOMOUS_TRIGGERED",
            Self::EffectDamage => "EFFECT_DAMAGE",
            Self::EffectHeal => "EFFECT_HEAL",
            Self::EffectBuff => "EFFECT_BUFF",
            Self::EffectDebuff => "EFFECT_DEBUFF",
            Self::EffectDraw => "EFFECT_DRAW",
            Self::EffectDestroy => "EFFECT_DESTROY",
            Self::EffectSilence => "EFFECT_SILENCE",
            Self::EffectTransform => "EFFECT_TRANSFORM",
            Self::EffectMana => "EFFECT_MANA",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that happened in the game.
///
/// Events describe, they never drive rules: dropping every subscriber
/// changes nothing about how a game plays out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted { first_player: PlayerId },
    TurnStarted { player: PlayerId, turn: u32 },
    TurnEnded { player: PlayerId },
    GameOver { winner: PlayerId },

    CardPlayed { player: PlayerId, instance_id: InstanceId, card: CardId, target: Option<Target> },
    SpellCast { player: PlayerId, card: CardId },
    RelicPlayed { player: PlayerId, card: CardId },
    CardDrawn { player: PlayerId, instance_id: InstanceId },
    /// Drawn into a full hand and sent to the graveyard.
    CardBurned { player: PlayerId, card: CardId },
    CreatureSummoned { player: PlayerId, instance_id: InstanceId },
    CreatureDied { player: PlayerId, instance_id: InstanceId, card: CardId },
    CreatureEvolved { player: PlayerId, instance_id: InstanceId, name: String },

    AttackStarted { attacker: Target, defender: Target },
    CombatResolved { attacker: Target, defender: Target, attacker_damage: u32, defender_damage: u32 },
    /// Damage to a creature, after armor.
    DamageDealt { target: Target, amount: u32 },
    HeroDamaged { player: PlayerId, amount: u32 },
    HealApplied { target: Target, amount: u32 },
    VenomousTriggered { source: Target, victim: Target },

    EffectDamage { source_player: PlayerId, amount: u32 },
    EffectHeal { source_player: PlayerId, amount: u32 },
    EffectBuff { source_player: PlayerId, attack: i32, health: i32 },
    EffectDebuff { source_player: PlayerId, attack: i32, health: i32 },
    EffectDraw { player: PlayerId, amount: u32 },
    EffectDestroy { source_player: PlayerId },
    EffectSilence { source_player: PlayerId },
    EffectTransform { source_player: PlayerId, into: String },
    EffectMana { player: PlayerId, gain: u32, crystal: u32 },
}

impl GameEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::GameStarted { .. } => EventKind::GameStarted,
            Self::TurnStarted { .. } => EventKind::TurnStarted,
            Self::TurnEnded { .. } => EventKind::TurnEnded,
            Self::GameOver { .. } => EventKind::GameOver,
            Self::CardPlayed { .. } => EventKind::CardPlayed,
            Self::SpellCast { .. } => EventKind::SpellCast,
            Self::RelicPlayed { .. } => EventKind::RelicPlayed,
            Self::CardDrawn { .. } => EventKind::CardDrawn,
            Self::CardBurned { .. } => EventKind::CardBurned,
            Self::CreatureSummoned { .. } => EventKind::CreatureSummoned,
            Self::CreatureDied { .. } => EventKind::CreatureDied,
            Self::CreatureEvolved { .. } => EventKind::CreatureEvolved,
            Self::AttackStarted { .. } => EventKind::AttackStarted,
            Self::CombatResolved { .. } => EventKind::CombatResolved,
            Self::DamageDealt { .. } => EventKind::DamageDealt,
            Self::HeroDamaged { .. } => EventKind::HeroDamaged,
            Self::HealApplied { .. } => EventKind::HealApplied,
            Self::VenomousTriggered { .. } => EventKind::VenomousTriggered,
            Self::EffectDamage { .. } => EventKind::EffectDamage,
            Self::EffectHeal { .. } => EventKind::EffectHeal,
            Self::EffectBuff { .. } => EventKind::EffectBuff,
            Self::EffectDebuff { .. } => EventKind::EffectDebuff,
            Self::EffectDraw { .. } => EventKind::EffectDraw,
            Self::EffectDestroy { .. } => EventKind::EffectDestroy,
            Self::EffectSilence { .. } => EventKind::EffectSilence,
            Self::EffectTransform { .. } => EventKind::EffectTransform,
            Self::EffectMana { .. } => EventKind::EffectMana,
        }
    }

    /// Stable upper-snake event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}
