//! Card catalog.
//!
//! The `CardRegistry` stores every card definition for a game and provides
//! lookup by `CardId`. The engine only reads from it; decks are built as
//! lists of cloned definitions and handed to `Engine::start_game`.
//!
//! Catalogs load from a JSON array of definitions. Every entry is parsed
//! and validated up front, so a malformed card is a load error instead of
//! a failure in the middle of a game.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, Faction};
use crate::error::CatalogError;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use stonefire_engine::cards::{CardRegistry, CardDefinition, CardId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::creature("tri_003", "Plateosaurus", 3, 2, 4)).unwrap();
///
/// let found = registry.get(&CardId::new("tri_003")).unwrap();
/// assert_eq!(found.name, "Plateosaurus");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a catalog from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<CardDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        log::debug!("loaded catalog with {} cards", registry.len());
        Ok(registry)
    }

    /// Validate and register a card definition.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        card.validate()?;
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id.clone(), card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Cards of one faction, sorted by id.
    #[must_use]
    pub fn by_faction(&self, faction: Faction) -> Vec<&CardDefinition> {
        let mut cards: Vec<_> = self.cards.values().filter(|c| c.faction == faction).collect();
        cards.sort_by(|a, b| a.id.cmp(&b.id));
        cards
    }

    /// Build a deck from a list of card ids, in the given order.
    pub fn build_deck<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<CardDefinition>, CatalogError> {
        ids.iter()
            .map(|id| {
                let id = CardId::new(id.as_ref());
                self.get(&id).cloned().ok_or(CatalogError::UnknownCard(id))
            })
            .collect()
    }
}
