//! Combat between creatures and heroes.
//!
//! An attack on a creature is a simultaneous exchange: each side deals its
//! attack, reduced by the other's armor. An attack on a hero is one-way.
//! Venomous and `TakesDamage` abilities are resolved here; removing the
//! dead is left to the death sweep that follows.

mod resolver;

pub use resolver::{CombatPreview, CombatResolver};
