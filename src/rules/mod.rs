//! Turn controller, command validation and read-only queries.
//!
//! - `Engine`: the command surface (`start_game`, `play_card`, `attack`,
//!   `end_turn`, `check_evolve`)
//! - `TurnState`: where the game is in the turn cycle
//! - `queries`: precondition checks shared by commands, UIs and AIs

mod engine;
pub mod queries;
mod turn;

pub use engine::Engine;
pub use turn::TurnState;
