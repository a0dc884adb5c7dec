//! Effect definitions.
//!
//! An `Effect` is a description of what a card does, as data. The
//! interpreter executes it against the live state; nothing here touches a
//! game.
//!
//! ## Targeted effects
//!
//! Damage, heal, buff, debuff, destroy, transform and silence carry a
//! [`Selector`] that is resolved when the effect runs, not when the card
//! was written or played.
//!
//! ## Composite effects
//!
//! - `Multiple`: run sub-effects in order; later ones see earlier results
//! - `Conditional`: run `then` or `else` depending on a [`Condition`]
//!
//! ## Catalog shape
//!
//! Effects are externally tagged in JSON:
//!
//! ```
//! use stonefire_engine::effects::{Effect, Selector};
//!
//! let json = r#"{ "multiple": [
//!     { "damage": { "target": "target", "amount": 3 } },
//!     { "draw": { "amount": 1 } }
//! ] }"#;
//!
//! let effect: Effect = serde_json::from_str(json).unwrap();
//! assert_eq!(effect, Effect::multiple(vec![
//!     Effect::damage(Selector::Target, 3),
//!     Effect::draw(1),
//! ]));
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::condition::Condition;
use crate::error::CatalogError;
use crate::cards::CreatureForm;

fn one() -> u32 {
    1
}

/// Which side a selector picks from, relative to the effect's source player.
///
/// The catalog spells selectors as string tokens. `random_enemy` picks among
/// enemy creatures only; `random_enemy_or_hero` adds the enemy hero to the
/// pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    /// The target chosen when the card was played.
    Target,
    /// The creature the effect belongs to.
    Source,
    /// The creature that dealt the damage (damage triggers only).
    Attacker,
    /// Every enemy creature.
    AllEnemies,
    /// Every friendly creature.
    AllFriendly,
    /// Every creature, friendly board first.
    AllCreatures,
    SelfHero,
    EnemyHero,
    /// One random enemy creature, or the enemy hero too when `include_hero`.
    RandomEnemy { include_hero: bool },
    /// One random enemy creature.
    RandomEnemyCreature,
    /// One random friendly creature.
    RandomFriendly,
    /// The enemy creature with the lowest current health.
    LowestHealth,
}

impl Selector {
    /// `random_enemy`: enemy creatures only.
    pub const RANDOM_ENEMY: Self = Self::RandomEnemy { include_hero: false };

    /// `random_enemy_or_hero`: enemy creatures and the enemy hero.
    pub const RANDOM_ENEMY_OR_HERO: Self = Self::RandomEnemy { include_hero: true };

    /// Does this selector draw from the RNG?
    #[must_use]
    pub const fn is_random(self) -> bool {
        matches!(self, Self::RandomEnemy { .. } | Self::RandomEnemyCreature | Self::RandomFriendly)
    }

    /// The catalog token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Source => "self",
            Self::Attacker => "attacker",
            Self::AllEnemies => "all_enemies",
            Self::AllFriendly => "all_friendly",
            Self::AllCreatures => "all_creatures",
            Self::SelfHero => "self_hero",
            Self::EnemyHero => "enemy_hero",
            Self::RandomEnemy { include_hero: false } => "random_enemy",
            Self::RandomEnemy { include_hero: true } => "random_enemy_or_hero",
            Self::RandomEnemyCreature => "random_enemy_creature",
            Self::RandomFriendly => "random_friendly",
            Self::LowestHealth => "lowest_health",
        }
    }
}

impl FromStr for Selector {
    type Err = CatalogError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Ok(match token {
            "target" => Self::Target,
            "self" => Self::Source,
            "attacker" => Self::Attacker,
            "all_enemies" => Self::AllEnemies,
            "all_friendly" => Self::AllFriendly,
            "all_creatures" => Self::AllCreatures,
            "self_hero" => Self::SelfHero,
            "enemy_hero" => Self::EnemyHero,
            "random_enemy" => Self::RANDOM_ENEMY,
            "random_enemy_or_hero" => Self::RANDOM_ENEMY_OR_HERO,
            "random_enemy_creature" => Self::RandomEnemyCreature,
            "random_friendly" => Self::RandomFriendly,
            "lowest_health" => Self::LowestHealth,
            other => return Err(CatalogError::UnknownSelector(other.to_string())),
        })
    }
}

impl TryFrom<String> for Selector {
    type Error = CatalogError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.token().to_string()
    }
}

/// Whose deck a draw effect pulls from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawTarget {
    #[default]
    #[serde(rename = "self")]
    Owner,
    Opponent,
}

/// A card effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Damage { target: Selector, amount: u32 },

    /// Restore health. Not capped at max health.
    Heal { target: Selector, amount: u32 },

    /// Raise attack and both current and max health.
    Buff {
        target: Selector,
        #[serde(default)]
        attack: i32,
        #[serde(default)]
        health: i32,
    },

    /// Lower attack (floored at 0) and current health.
    Debuff {
        target: Selector,
        #[serde(default)]
        attack: i32,
        #[serde(default)]
        health: i32,
    },

    Draw {
        #[serde(default = "one")]
        amount: u32,
        #[serde(default)]
        target: DrawTarget,
    },

    /// Mark creatures for death. The death sweep removes them.
    Destroy { target: Selector },

    /// Summon tokens for the source player, truncated to free board space.
    Summon {
        creature: CreatureForm,
        #[serde(default = "one")]
        count: u32,
    },

    /// Gain temporary mana and/or mana crystals.
    Mana {
        #[serde(default)]
        gain: u32,
        #[serde(default)]
        crystal: u32,
    },

    /// Replace a creature, keeping its instance id. The result cannot
    /// attack this turn.
    Transform { target: Selector, into: CreatureForm },

    /// Remove keywords, abilities, battlecry, extinct and evolve.
    Silence { target: Selector },

    Conditional {
        condition: Condition,
        then: Box<Effect>,
        #[serde(default, rename = "else")]
        otherwise: Option<Box<Effect>>,
    },

    Multiple(Vec<Effect>),
}

impl Effect {
    #[must_use]
    pub fn damage(target: Selector, amount: u32) -> Self {
        Self::Damage { target, amount }
    }

    #[must_use]
    pub fn heal(target: Selector, amount: u32) -> Self {
        Self::Heal { target, amount }
    }

    #[must_use]
    pub fn buff(target: Selector, attack: i32, health: i32) -> Self {
        Self::Buff { target, attack, health }
    }

    #[must_use]
    pub fn debuff(target: Selector, attack: i32, health: i32) -> Self {
        Self::Debuff { target, attack, health }
    }

    /// Draw for the source player.
    #[must_use]
    pub fn draw(amount: u32) -> Self {
        Self::Draw {
            amount,
            target: DrawTarget::Owner,
        }
    }

    /// Make the opponent draw.
    #[must_use]
    pub fn opponent_draws(amount: u32) -> Self {
        Self::Draw {
            amount,
            target: DrawTarget::Opponent,
        }
    }

    #[must_use]
    pub fn destroy(target: Selector) -> Self {
        Self::Destroy { target }
    }

    #[must_use]
    pub fn summon(creature: CreatureForm, count: u32) -> Self {
        Self::Summon { creature, count }
    }

    #[must_use]
    pub fn mana(gain: u32, crystal: u32) -> Self {
        Self::Mana { gain, crystal }
    }

    #[must_use]
    pub fn transform(target: Selector, into: CreatureForm) -> Self {
        Self::Transform { target, into }
    }

    #[must_use]
    pub fn silence(target: Selector) -> Self {
        Self::Silence { target }
    }

    /// Run `then` if `condition` holds, otherwise `otherwise` (if any).
    #[must_use]
    pub fn conditional(condition: Condition, then: Effect, otherwise: Option<Effect>) -> Self {
        Self::Conditional {
            condition,
            then: Box::new(then),
            otherwise: otherwise.map(Box::new),
        }
    }

    #[must_use]
    pub fn multiple(effects: Vec<Effect>) -> Self {
        Self::Multiple(effects)
    }

    /// The selector this effect targets with, for single-step effects.
    #[must_use]
    pub fn selector(&self) -> Option<Selector> {
        match self {
            Self::Damage { target, .. }
            | Self::Heal { target, .. }
            | Self::Buff { target, .. }
            | Self::Debuff { target, .. }
            | Self::Destroy { target }
            | Self::Transform { target, .. }
            | Self::Silence { target } => Some(*target),
            _ => None,
        }
    }

    /// Does this effect, or any effect nested in it, use `selector`?
    #[must_use]
    pub fn uses_selector(&self, selector: Selector) -> bool {
        match self {
            Self::Conditional { then, otherwise, .. } => {
                then.uses_selector(selector)
                    || otherwise.as_ref().is_some_and(|e| e.uses_selector(selector))
            }
            Self::Multiple(effects) => effects.iter().any(|e| e.uses_selector(selector)),
            other => other.selector() == Some(selector),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Damage { .. } => "damage",
            Self::Heal { .. } => "heal",
            Self::Buff { .. } => "buff",
            Self::Debuff { .. } => "debuff",
            Self::Draw { .. } => "draw",
            Self::Destroy { .. } => "destroy",
            Self::Summon { .. } => "summon",
            Self::Mana { .. } => "mana",
            Self::Transform { .. } => "transform",
            Self::Silence { .. } => "silence",
            Self::Conditional { .. } => "conditional",
            Self::Multiple(_) => "multiple",
        }
    }
}
