//! Effect system for card abilities.
//!
//! - `Effect`: data description of what a card does
//! - `Selector`: how an effect picks its targets when it runs
//! - `Condition`: board checks for conditional effects and evolve
//! - `EffectInterpreter`: executes effects and triggered abilities
//! - `resolve_deaths`: the death sweep that follows damage and destroy
//!
//! Effects are catalog data. Unknown tags, selectors and conditions fail
//! when the catalog is parsed, never in the middle of a game.

mod condition;
mod deaths;
mod effect;
mod interpreter;
pub mod targeting;

pub use condition::{Comparison, Condition, ConditionKind};
pub use deaths::{resolve_deaths, DeathReport};
pub use effect::{DrawTarget, Effect, Selector};
pub use interpreter::{EffectContext, EffectInterpreter, ResolveResult};
