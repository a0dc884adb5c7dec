//! Card system: definitions, keywords, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Catalog identifier (e.g. `"tri_001"`)
//! - `CardDefinition`: Static card data, loaded once and never mutated
//! - `KeywordSet`: Structured keywords (`Guard`, `Charge`, `Venomous`, `Armored(n)`)
//! - `CardInstance`: A card in play with its runtime stats
//! - `CardRegistry`: Catalog lookup and deck building

pub mod keyword;
pub mod definition;
pub mod instance;
pub mod registry;

pub use keyword::{Keyword, KeywordSet};
pub use definition::{CardDefinition, CardId, CardType, CreatureForm, EvolveSpec, Faction, TargetType};
pub use instance::CardInstance;
pub use registry::CardRegistry;
