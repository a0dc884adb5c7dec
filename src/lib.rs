//! # stonefire-engine
//!
//! Rules engine for Stonefire, a two-player turn-based card game.
//!
//! ## Design Principles
//!
//! 1. **Single Source of Truth**: All game state lives in one `GameState`
//!    snapshot owned by the `Store`. Every change goes through
//!    `Store::dispatch`, which maps `(state, action)` to a new snapshot.
//!
//! 2. **Deterministic**: Deck shuffling and random targeting draw from one
//!    seedable `GameRng`. The same seed and commands replay the same game.
//!
//! 3. **Resolve to Completion**: Every command (play, attack, end turn)
//!    finishes its whole trigger and death cascade before returning.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Hands, boards and decks are `im`
//!   vectors, so each transition produces a new snapshot with structural
//!   sharing instead of a deep copy.
//!
//! - **Two Event Streams**: `TriggerEvent`s drive triggered abilities inside
//!   the engine; `GameEvent`s are published on the `EventBus` for observers.
//!
//! ## Modules
//!
//! - `core`: Players, ids, state, actions, the store, RNG, configuration
//! - `cards`: Card definitions, keywords, runtime instances, the catalog
//! - `triggers`: Observation events, the event bus, triggered abilities
//! - `effects`: Effect descriptions, target selection, the interpreter
//! - `combat`: Damage exchange between creatures and heroes
//! - `rules`: Turn controller, command validation and read-only queries

pub mod error;
pub mod core;
pub mod cards;
pub mod triggers;
pub mod effects;
pub mod combat;
pub mod rules;

// Re-export commonly used types
pub use crate::error::{ActionError, CatalogError, SnapshotError};

pub use crate::core::{
    InstanceId, Target, PlayerId, PlayerMap,
    GameRng, GameRngState, RulesConfig,
    Action, ActionRecord, CreatureChanges,
    GameState, PlayerState, Phase, Selection,
    Store, Transition, GameSnapshot,
};

pub use crate::cards::{
    CardId, CardType, Faction, TargetType, CardDefinition, CreatureForm, EvolveSpec,
    CardInstance, CardRegistry, Keyword, KeywordSet,
};

pub use crate::triggers::{
    EventKind, GameEvent, EventBus, SubscriptionId,
    Trigger, TriggerPlayer, TriggeredAbility, TriggerEvent,
};

pub use crate::effects::{
    Effect, Selector, DrawTarget, Condition, ConditionKind, Comparison,
    EffectContext, EffectInterpreter, ResolveResult, DeathReport, resolve_deaths,
};

pub use crate::combat::{CombatPreview, CombatResolver};

pub use crate::rules::{Engine, TurnState};
