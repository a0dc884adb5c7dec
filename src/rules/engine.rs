//! The turn controller.
//!
//! `Engine` is the command surface of a game. Each command validates
//! first, then drives the `Store` through actions, the effect interpreter
//! and the combat resolver, and finishes its whole trigger and death
//! cascade before returning.
//!
//! ## Command flow
//!
//! - `start_game`: shuffle, deal opening hands, start the first turn
//! - `end_turn`: end-of-turn triggers, then the other player's turn starts
//! - `play_card`: pay, resolve the card's effect or battlecry, sweep deaths
//! - `attack`: combat, sweep deaths
//!
//! A rejected command returns an `ActionError` and changes nothing. A
//! command that was legal when issued returns `Ok` even if it ended the
//! game part way through.

use crate::cards::{CardDefinition, CardType};
use crate::combat::{CombatPreview, CombatResolver};
use crate::core::{
    Action, ActionRecord, GameSnapshot, GameState, InstanceId, PlayerId, RulesConfig, Store, Target,
};
use crate::effects::{resolve_deaths, DeathReport, EffectContext, EffectInterpreter};
use crate::error::ActionError;
use crate::triggers::{EventKind, GameEvent, SubscriptionId, Trigger, TriggerEvent};

use super::queries;
use super::turn::TurnState;

/// A game of Stonefire.
#[derive(Debug)]
pub struct Engine {
    store: Store,
}

impl Engine {
    /// Create an engine with an empty pre-game state.
    #[must_use]
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        Self {
            store: Store::new(config, seed),
        }
    }

    /// Wrap an existing store.
    #[must_use]
    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        self.store.config()
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<ActionRecord> {
        self.store.history()
    }

    // === Events ===

    pub fn subscribe(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.store.bus_mut().on(kind, listener)
    }

    pub fn subscribe_all(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.store.bus_mut().on_any(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.bus_mut().off(id)
    }

    // === Commands ===

    /// Start a new game. Both decks are shuffled with the engine's RNG.
    pub fn start_game(&mut self, player_deck: Vec<CardDefinition>, enemy_deck: Vec<CardDefinition>) -> Result<(), ActionError> {
        let mut player_deck = player_deck;
        let mut enemy_deck = enemy_deck;
        let rng = self.store.rng_mut();
        rng.shuffle(&mut player_deck);
        rng.shuffle(&mut enemy_deck);

        log::info!(
            "starting game: {} vs {} cards, seed {}",
            player_deck.len(),
            enemy_deck.len(),
            self.store.rng_state().seed
        );
        self.store.dispatch(Action::StartGame { player_deck, enemy_deck })?;

        let first = self.config().first_player;
        for player in [first, first.opponent()] {
            for _ in 0..self.config().opening_hand(player) {
                EffectInterpreter::run_action(&mut self.store, Action::DrawCard { player })?;
            }
        }

        self.start_turn(first)?;
        self.store.emit(GameEvent::GameStarted { first_player: first });
        Ok(())
    }

    /// Begin `player`'s turn: refresh mana and creatures, draw (except the
    /// first player's first turn), fire turn-start triggers, sweep deaths.
    pub fn start_turn(&mut self, player: PlayerId) -> Result<(), ActionError> {
        EffectInterpreter::run_action(&mut self.store, Action::StartTurn { player })?;

        let turn = self.state().turn;
        let skip_draw = player == self.config().first_player && turn == 1;
        if !skip_draw && self.draw(player).is_err() {
            return Ok(());
        }

        EffectInterpreter::check_triggered(&mut self.store, &TriggerEvent::new(Trigger::TurnStart, player), 0);
        self.sweep();
        if self.finished() {
            return Ok(());
        }

        log::info!("turn {} starts for {}", turn, player);
        self.store.emit(GameEvent::TurnStarted { player, turn });
        Ok(())
    }

    fn draw(&mut self, player: PlayerId) -> Result<usize, ActionError> {
        EffectInterpreter::run_action(&mut self.store, Action::DrawCard { player })
    }

    /// End the active player's turn and start the other player's.
    pub fn end_turn(&mut self) -> Result<(), ActionError> {
        if self.state().game_over {
            return Err(ActionError::GameOver);
        }
        let player = self.state().active_player;
        log::debug!("{} ends turn {}", player, self.state().turn);

        EffectInterpreter::check_triggered(&mut self.store, &TriggerEvent::new(Trigger::TurnEnd, player), 0);
        self.sweep();
        if self.finished() {
            return Ok(());
        }

        self.store.dispatch(Action::EndTurn)?;
        self.store.emit(GameEvent::TurnEnded { player });
        self.start_turn(player.opponent())
    }

    /// Play a card from `player`'s hand.
    ///
    /// Creatures enter the board and run their battlecry with themselves as
    /// the source; spells and relics run their effect and go to the
    /// graveyard.
    pub fn play_card(&mut self, player: PlayerId, instance_id: InstanceId, target: Option<Target>) -> Result<(), ActionError> {
        if let Err(e) = queries::validate_play(self.state(), self.config(), player, instance_id, target) {
            log::debug!("{} cannot play {}: {}", player, instance_id, e);
            return Err(e);
        }
        let card = self
            .state()
            .player(player)
            .hand_card(instance_id)
            .map(|c| c.card.clone())
            .ok_or(ActionError::CardNotInHand(instance_id))?;
        log::debug!("{} plays {} ({})", player, card.name, instance_id);

        EffectInterpreter::run_action(&mut self.store, Action::PlayCard { player, instance_id, target })?;

        let ctx = EffectContext::new(player).with_optional_target(target);
        let effect = match card.card_type {
            CardType::Creature => card.battlecry.as_ref().map(|e| (e, ctx.with_source(instance_id))),
            CardType::Spell | CardType::Relic => card.effect.as_ref().map(|e| (e, ctx)),
        };
        if let Some((effect, ctx)) = effect {
            EffectInterpreter::apply(&mut self.store, effect, &ctx);
        }

        if self.store.dispatch(Action::ClearSelection).is_err() {
            self.finished();
            return Ok(());
        }
        self.store.emit(GameEvent::CardPlayed {
            player,
            instance_id,
            card: card.id.clone(),
            target,
        });
        self.settle();
        Ok(())
    }

    /// Attack `defender` with `attacker`.
    pub fn attack(&mut self, player: PlayerId, attacker: InstanceId, defender: Target) -> Result<(), ActionError> {
        if let Err(e) = queries::validate_attack(self.state(), player, attacker, defender) {
            log::debug!("{} cannot attack {} with {}: {}", player, defender, attacker, e);
            return Err(e);
        }
        log::debug!("{} attacks {} with {}", player, defender, attacker);

        self.store.dispatch(Action::Attack { player, attacker })?;
        CombatResolver::resolve_combat(&mut self.store, player, attacker, defender);

        if self.store.dispatch(Action::ClearSelection).is_err() {
            self.finished();
            return Ok(());
        }
        self.settle();
        Ok(())
    }

    /// Evolve every creature whose condition holds. Returns how many did.
    pub fn check_evolve(&mut self) -> usize {
        let evolved = EffectInterpreter::check_evolve(&mut self.store);
        if evolved > 0 {
            self.sweep();
        }
        evolved
    }

    /// Sweep deaths, then evolve if enabled.
    fn settle(&mut self) {
        self.sweep();
        if self.config().auto_evolve && !self.state().game_over {
            self.check_evolve();
        }
        self.finished();
    }

    fn sweep(&mut self) -> DeathReport {
        let report = resolve_deaths(&mut self.store, 0);
        if !report.is_empty() {
            log::debug!("{} creatures died in {} passes", report.count(), report.passes);
        }
        report
    }

    /// Log the end of the game. Returns whether it is over.
    fn finished(&self) -> bool {
        let state = self.state();
        if state.game_over {
            if let Some(winner) = state.winner {
                log::info!("game over on turn {}: {} wins", state.turn, winner);
            }
        }
        state.game_over
    }

    // === Queries ===

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        TurnState::of(self.state())
    }

    #[must_use]
    pub fn can_play_card(&self, player: PlayerId, instance_id: InstanceId) -> bool {
        queries::can_play_card(self.state(), self.config(), player, instance_id)
    }

    #[must_use]
    pub fn can_creature_attack(&self, player: PlayerId, instance_id: InstanceId) -> bool {
        queries::can_creature_attack(self.state(), player, instance_id)
    }

    #[must_use]
    pub fn valid_targets(&self, player: PlayerId, card: &CardDefinition) -> Vec<Target> {
        queries::valid_targets(self.state(), player, card)
    }

    #[must_use]
    pub fn valid_attack_targets(&self, player: PlayerId) -> Vec<Target> {
        queries::valid_attack_targets(self.state(), player)
    }

    #[must_use]
    pub fn preview_combat(&self, player: PlayerId, attacker: InstanceId, defender: Target) -> Option<CombatPreview> {
        CombatResolver::preview_combat(self.state(), player, attacker, defender)
    }

    #[must_use]
    pub fn would_be_lethal(&self, player: PlayerId) -> bool {
        CombatResolver::would_be_lethal(self.state(), player)
    }

    // === Snapshots ===

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.store)
    }

    pub fn restore(&mut self, snapshot: &GameSnapshot) {
        snapshot.restore_into(&mut self.store);
    }
}
