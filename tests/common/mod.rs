//! Shared setup for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use stonefire_engine::cards::{CardDefinition, CardInstance};
use stonefire_engine::core::{GameState, InstanceId, PlayerId, RulesConfig};
use stonefire_engine::rules::Engine;
use stonefire_engine::triggers::GameEvent;

/// Vanilla 1/2 creatures, ids `<prefix>0..`.
pub fn filler_deck(prefix: &str, size: usize) -> Vec<CardDefinition> {
    (0..size)
        .map(|i| CardDefinition::creature(format!("{}{}", prefix, i), "Grunt", 1, 1, 2))
        .collect()
}

/// A started game on the player's first turn.
pub fn engine() -> Engine {
    engine_with(RulesConfig::default())
}

pub fn engine_with(config: RulesConfig) -> Engine {
    let mut engine = Engine::new(config, 7);
    engine
        .start_game(filler_deck("p", 20), filler_deck("e", 20))
        .expect("start game");
    engine
}

/// Edit the live state directly, keeping the RNG where it is.
pub fn edit(engine: &mut Engine, f: impl FnOnce(&mut GameState)) {
    let mut state = engine.state().clone();
    f(&mut state);
    let rng = engine.store().rng_state();
    engine.store_mut().restore(state, &rng);
}

/// Put a creature straight onto a board, ready to attack.
pub fn put_on_board(engine: &mut Engine, player: PlayerId, card: CardDefinition) -> InstanceId {
    let mut id = InstanceId::new(0);
    edit(engine, |state| {
        id = state.allocate_id();
        let mut creature = CardInstance::new(id, card);
        creature.ready();
        state.player_mut(player).board.push_back(creature);
    });
    id
}

pub fn put_in_hand(engine: &mut Engine, player: PlayerId, card: CardDefinition) -> InstanceId {
    let mut id = InstanceId::new(0);
    edit(engine, |state| {
        id = state.allocate_id();
        state.player_mut(player).hand.push_back(CardInstance::new(id, card));
    });
    id
}

pub fn set_mana(engine: &mut Engine, player: PlayerId, mana: u32) {
    edit(engine, |state| {
        let side = state.player_mut(player);
        side.mana = mana;
        side.max_mana = side.max_mana.max(mana);
    });
}

pub fn set_health(engine: &mut Engine, player: PlayerId, health: i32) {
    edit(engine, |state| state.player_mut(player).health = health);
}

pub fn clear_board(engine: &mut Engine, player: PlayerId) {
    edit(engine, |state| state.player_mut(player).board.clear());
}

/// Record every event published from now on.
pub fn record(engine: &mut Engine) -> Rc<RefCell<Vec<GameEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    engine.subscribe_all(move |e| sink.borrow_mut().push(e.clone()));
    events
}

pub fn creature_health(engine: &Engine, player: PlayerId, id: InstanceId) -> Option<i32> {
    engine.state().creature(player, id).map(|c| c.current_health)
}
