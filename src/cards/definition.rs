//! Card definitions - static card data.
//!
//! `CardDefinition` holds what is printed on a card: cost, stats,
//! keywords, and the effect descriptions for battlecries, spells,
//! triggered abilities, evolve and extinct. Runtime stats live on
//! `CardInstance`.
//!
//! Definitions deserialize from the catalog's JSON shape, with optional
//! parts left out:
//!
//! ```
//! use stonefire_engine::cards::{CardDefinition, CardType};
//!
//! let card: CardDefinition = serde_json::from_str(r#"{
//!     "id": "tri_001",
//!     "name": "Eoraptor Scout",
//!     "type": "creature",
//!     "cost": 1,
//!     "attack": 1,
//!     "health": 2,
//!     "keywords": ["charge"]
//! }"#).unwrap();
//!
//! assert_eq!(card.card_type, CardType::Creature);
//! assert!(card.keywords.has_charge());
//! ```

use serde::{Deserialize, Serialize};

use super::keyword::{Keyword, KeywordSet};
use crate::effects::{Condition, Effect};
use crate::error::CatalogError;
use crate::triggers::TriggeredAbility;

/// Catalog identifier for a card definition.
///
/// Identifies the printed card (e.g. "Eoraptor Scout"), not a copy of it
/// in a game. Copies are told apart by `InstanceId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of card this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Enters the board.
    Creature,
    /// Resolves its effect and goes to the graveyard.
    Spell,
    /// Resolves its effect and goes to the graveyard.
    Relic,
}

/// Card faction. Only used for deck building and display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Triassic,
    Jurassic,
    Cretaceous,
    Primordial,
    #[serde(rename = "iceage")]
    IceAge,
    #[default]
    Neutral,
}

/// What a targeted card may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    EnemyCreature,
    FriendlyCreature,
    AnyCreature,
    /// Enemy creatures and the enemy hero.
    Enemy,
    /// Every creature and both heroes.
    Any,
    /// The enemy hero.
    Hero,
}

/// Stats and keywords for a creature that is created or replaced by an
/// effect: summoned tokens, transform results and evolved forms.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureForm {
    pub name: String,
    pub attack: i32,
    pub health: i32,
    #[serde(default)]
    pub keywords: KeywordSet,
    #[serde(default)]
    pub text: String,
}

impl CreatureForm {
    /// Create a vanilla form.
    #[must_use]
    pub fn new(name: impl Into<String>, attack: i32, health: i32) -> Self {
        Self {
            name: name.into(),
            attack,
            health,
            keywords: KeywordSet::new(),
            text: String::new(),
        }
    }

    /// Add a keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.insert(keyword);
        self
    }

    /// Build the definition a summoned token of this form is created from.
    #[must_use]
    pub fn to_definition(&self) -> CardDefinition {
        let slug: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let mut card = CardDefinition::creature(format!("token_{}", slug), &self.name, 0, self.attack, self.health);
        card.keywords = self.keywords.clone();
        card.text = self.text.clone();
        card
    }
}

/// An evolve clause: when `condition` holds for the controller, the
/// creature becomes `into`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolveSpec {
    pub condition: Condition,
    pub into: CreatureForm,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use stonefire_engine::cards::{CardDefinition, Keyword, TargetType};
/// use stonefire_engine::effects::{Effect, Selector};
///
/// let raptor = CardDefinition::creature("tri_005", "Sharp-Toothed Raptor", 2, 2, 1)
///     .with_keyword(Keyword::Venomous)
///     .with_battlecry(Effect::damage(Selector::Target, 1))
///     .with_target(TargetType::AnyCreature);
///
/// assert!(raptor.requires_target);
/// assert!(raptor.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Catalog identifier.
    pub id: CardId,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub faction: Faction,

    #[serde(rename = "type")]
    pub card_type: CardType,

    /// Mana cost.
    pub cost: u32,

    /// Base attack (creatures only).
    #[serde(default)]
    pub attack: i32,

    /// Base health (creatures only).
    #[serde(default)]
    pub health: i32,

    #[serde(default)]
    pub keywords: KeywordSet,

    /// Runs once when the creature is played from hand.
    #[serde(default)]
    pub battlecry: Option<Effect>,

    /// Spell or relic effect.
    #[serde(default)]
    pub effect: Option<Effect>,

    /// Standing triggered abilities while on the board.
    #[serde(default)]
    pub abilities: Vec<TriggeredAbility>,

    #[serde(default)]
    pub evolve: Option<EvolveSpec>,

    /// Runs once when the creature dies.
    #[serde(default)]
    pub extinct: Option<Effect>,

    #[serde(default)]
    pub target_type: Option<TargetType>,

    /// Playing this card requires an explicit target.
    #[serde(default)]
    pub requires_target: bool,

    /// Rules text.
    #[serde(default)]
    pub text: String,
}

impl CardDefinition {
    fn base(id: impl Into<String>, name: impl Into<String>, card_type: CardType, cost: u32) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            faction: Faction::Neutral,
            card_type,
            cost,
            attack: 0,
            health: 0,
            keywords: KeywordSet::new(),
            battlecry: None,
            effect: None,
            abilities: Vec::new(),
            evolve: None,
            extinct: None,
            target_type: None,
            requires_target: false,
            text: String::new(),
        }
    }

    /// Create a creature card.
    #[must_use]
    pub fn creature(id: impl Into<String>, name: impl Into<String>, cost: u32, attack: i32, health: i32) -> Self {
        let mut card = Self::base(id, name, CardType::Creature, cost);
        card.attack = attack;
        card.health = health;
        card
    }

    /// Create a spell card.
    #[must_use]
    pub fn spell(id: impl Into<String>, name: impl Into<String>, cost: u32, effect: Effect) -> Self {
        let mut card = Self::base(id, name, CardType::Spell, cost);
        card.effect = Some(effect);
        card
    }

    /// Create a relic card.
    #[must_use]
    pub fn relic(id: impl Into<String>, name: impl Into<String>, cost: u32, effect: Effect) -> Self {
        let mut card = Self::base(id, name, CardType::Relic, cost);
        card.effect = Some(effect);
        card
    }

    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.insert(keyword);
        self
    }

    #[must_use]
    pub fn with_battlecry(mut self, effect: Effect) -> Self {
        self.battlecry = Some(effect);
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: TriggeredAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    #[must_use]
    pub fn with_evolve(mut self, condition: Condition, into: CreatureForm) -> Self {
        self.evolve = Some(EvolveSpec { condition, into });
        self
    }

    #[must_use]
    pub fn with_extinct(mut self, effect: Effect) -> Self {
        self.extinct = Some(effect);
        self
    }

    /// Require an explicit target of the given type.
    #[must_use]
    pub fn with_target(mut self, target_type: TargetType) -> Self {
        self.target_type = Some(target_type);
        self.requires_target = true;
        self
    }

    /// Allow, but don't require, a target of the given type.
    #[must_use]
    pub fn with_optional_target(mut self, target_type: TargetType) -> Self {
        self.target_type = Some(target_type);
        self.requires_target = false;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }

    /// Check the definition is playable as written.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidCard {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        match self.card_type {
            CardType::Creature if self.health <= 0 => Err(invalid("creature health must be positive")),
            CardType::Creature if self.attack < 0 => Err(invalid("creature attack cannot be negative")),
            CardType::Spell | CardType::Relic if self.effect.is_none() => Err(invalid("spells and relics need an effect")),
            _ if self.requires_target && self.target_type.is_none() => Err(invalid("requires a target but has no target type")),
            _ => Ok(()),
        }
    }
}
