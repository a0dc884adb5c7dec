//! Conditions for conditional effects and evolve clauses.
//!
//! A condition compares one number read from the source player's side of
//! the board against a fixed threshold.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};

/// The quantity a condition reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Creatures on the source player's board.
    BoardCount,
    /// Creatures on the opponent's board.
    EnemyBoardCount,
    /// Source player's hero health.
    Health,
    /// Cards in the source player's hand.
    HandCount,
    /// Source player's current mana.
    Mana,
}

/// Comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = "<=")]
    AtMost,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl Comparison {
    #[must_use]
    pub fn compare(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::AtLeast => lhs >= rhs,
            Self::AtMost => lhs <= rhs,
            Self::GreaterThan => lhs > rhs,
            Self::LessThan => lhs < rhs,
            Self::Equal => lhs == rhs,
            Self::NotEqual => lhs != rhs,
        }
    }
}

/// `kind operator value`, e.g. "board count >= 3".
///
/// ```
/// use stonefire_engine::core::{GameState, PlayerId, RulesConfig};
/// use stonefire_engine::effects::{Comparison, Condition, ConditionKind};
///
/// let state = GameState::new(&RulesConfig::default());
/// let wounded = Condition::new(ConditionKind::Health, Comparison::AtMost, 15);
///
/// assert!(!wounded.evaluate(&state, PlayerId::Player));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    pub operator: Comparison,
    pub value: i32,
}

impl Condition {
    #[must_use]
    pub fn new(kind: ConditionKind, operator: Comparison, value: i32) -> Self {
        Self { kind, operator, value }
    }

    /// Read the quantity for `player`.
    #[must_use]
    pub fn measure(&self, state: &GameState, player: PlayerId) -> i64 {
        let side = state.player(player);
        match self.kind {
            ConditionKind::BoardCount => side.board.len() as i64,
            ConditionKind::EnemyBoardCount => state.player(player.opponent()).board.len() as i64,
            ConditionKind::Health => i64::from(side.health),
            ConditionKind::HandCount => side.hand.len() as i64,
            ConditionKind::Mana => i64::from(side.mana),
        }
    }

    #[must_use]
    pub fn evaluate(&self, state: &GameState, player: PlayerId) -> bool {
        self.operator.compare(self.measure(state, player), i64::from(self.value))
    }
}
