//! The store: single owner of the current `GameState`.
//!
//! Every state change goes through [`Store::dispatch`], which runs the pure
//! transition function, swaps in the new snapshot, appends the action to
//! the history log and notifies listeners. Rejected actions change nothing
//! and are not logged.
//!
//! ## Replay
//!
//! Random choices (shuffles, random targets) are made by the effect
//! interpreter *before* it dispatches, and the resulting actions carry
//! concrete ids. The history therefore replays to the same state without
//! the RNG:
//!
//! ```
//! use stonefire_engine::core::{store, Action, PlayerId, RulesConfig, Store};
//!
//! let mut live = Store::new(RulesConfig::default(), 7);
//! live.dispatch(Action::StartGame { player_deck: vec![], enemy_deck: vec![] }).unwrap();
//! live.dispatch(Action::StartTurn { player: PlayerId::Player }).unwrap();
//!
//! let replayed = store::replay(RulesConfig::default(), live.history()).unwrap();
//! assert_eq!(&replayed, live.state());
//! ```

use im::Vector;

use super::action::{Action, ActionRecord};
use super::config::RulesConfig;
use super::rng::{GameRng, GameRngState};
use super::state::GameState;
use super::transition;
use crate::error::ActionError;
use crate::triggers::{EventBus, GameEvent, TriggerEvent};

/// Owner of the game state, RNG, event bus and action history.
pub struct Store {
    state: GameState,
    rng: GameRng,
    config: RulesConfig,
    bus: EventBus,
    history: Vector<ActionRecord>,
}

impl Store {
    /// Create a store holding an empty pre-game state.
    #[must_use]
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        Self::with_rng(config, GameRng::new(seed))
    }

    /// Create a store with an explicit generator.
    #[must_use]
    pub fn with_rng(config: RulesConfig, rng: GameRng) -> Self {
        Self {
            state: GameState::new(&config),
            rng,
            config,
            bus: EventBus::new(),
            history: Vector::new(),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Read the state while drawing randomness, e.g. to pick a random target.
    pub fn state_and_rng(&mut self) -> (&GameState, &mut GameRng) {
        (&self.state, &mut self.rng)
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Every accepted action since the store was created or reset.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Apply one action.
    ///
    /// On success the new snapshot is installed, the action is logged, and
    /// its observation events go to the bus. The returned trigger
    /// occurrences are for the effect interpreter to process.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<TriggerEvent>, ActionError> {
        log::debug!("dispatch {}", action.name());

        let transition = match transition::apply(&self.state, &action, &self.config) {
            Ok(t) => t,
            Err(e) => {
                log::debug!("rejected {}: {}", action.name(), e);
                return Err(e);
            }
        };

        if transition.state == self.state {
            log::trace!("{} changed nothing", action.name());
        }
        self.state = transition.state;

        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord::new(sequence, self.state.turn, action));

        for event in &transition.events {
            self.bus.emit(event);
        }

        Ok(transition.triggers)
    }

    /// Send a notification that has no state change of its own
    /// (`TurnStarted`, `AttackStarted`, effect notifications).
    pub fn emit(&mut self, event: GameEvent) {
        self.bus.emit(&event);
    }

    /// Replace the state and RNG, e.g. after loading a snapshot. The
    /// history is cleared; listeners stay subscribed.
    pub fn restore(&mut self, state: GameState, rng: &GameRngState) {
        log::info!("restoring snapshot at turn {}", state.turn);
        self.state = state;
        self.rng = GameRng::from_state(rng);
        self.history.clear();
    }

    /// Back to an empty pre-game state with the same seed.
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config);
        self.rng = GameRng::new(self.rng.seed());
        self.history.clear();
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("turn", &self.state.turn)
            .field("active_player", &self.state.active_player)
            .field("history", &self.history.len())
            .field("listeners", &self.bus.listener_count())
            .finish()
    }
}

/// Rebuild a state from an action history.
///
/// Fails with the first action the transition function rejects, which
/// means the history does not belong to `config`.
pub fn replay<'a>(
    config: RulesConfig,
    history: impl IntoIterator<Item = &'a ActionRecord>,
) -> Result<GameState, ActionError> {
    let mut state = GameState::new(&config);
    for record in history {
        state = transition::apply(&state, &record.action, &config)?.state;
    }
    Ok(state)
}
