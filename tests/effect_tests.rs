//! Card effect integration tests.
//!
//! Effects are exercised the way they reach the engine in play: as spell
//! effects, battlecries, extinct effects and triggered abilities.

mod common;

use common::*;
use stonefire_engine::cards::{CardDefinition, CreatureForm, Keyword, TargetType};
use stonefire_engine::core::{PlayerId, RulesConfig, Target};
use stonefire_engine::effects::{
    Comparison, Condition, ConditionKind, Effect, EffectContext, EffectInterpreter, Selector,
};
use stonefire_engine::error::ActionError;
use stonefire_engine::rules::Engine;
use stonefire_engine::triggers::{GameEvent, Trigger, TriggeredAbility};

const P: PlayerId = PlayerId::Player;
const E: PlayerId = PlayerId::Enemy;

/// Put a spell in the player's hand with enough mana to cast it.
fn spell(engine: &mut Engine, effect: Effect) -> stonefire_engine::core::InstanceId {
    set_mana(engine, P, 10);
    put_in_hand(engine, P, CardDefinition::spell("s", "Spell", 1, effect))
}

// =============================================================================
// Spells
// =============================================================================

#[test]
fn test_targeted_spell() {
    let mut engine = engine();
    set_mana(&mut engine, P, 3);
    let bolt = put_in_hand(
        &mut engine,
        P,
        CardDefinition::spell("bolt", "Bolt", 2, Effect::damage(Selector::Target, 3)).with_target(TargetType::Enemy),
    );

    assert_eq!(engine.play_card(P, bolt, None), Err(ActionError::TargetRequired));
    engine.play_card(P, bolt, Some(Target::hero(E))).unwrap();

    let state = engine.state();
    assert_eq!(state.player(E).health, 27);
    assert_eq!(state.player(P).mana, 1);
    assert!(state.player(P).hand_card(bolt).is_none());
    assert_eq!(state.player(P).graveyard.back().map(|c| c.instance_id), Some(bolt));
}

/// A relic resolves and goes to the graveyard like a spell.
#[test]
fn test_relic_resolves_and_leaves() {
    let mut engine = engine();
    set_mana(&mut engine, P, 5);
    let relic = put_in_hand(&mut engine, P, CardDefinition::relic("r", "Relic", 2, Effect::heal(Selector::SelfHero, 4)));
    set_health(&mut engine, P, 20);

    engine.play_card(P, relic, None).unwrap();

    assert_eq!(engine.state().player(P).health, 24);
    assert_eq!(engine.state().player(P).graveyard.len(), 1);
}

/// Area damage hits every enemy creature; the dead are swept afterwards.
#[test]
fn test_area_damage() {
    let mut engine = engine();
    let a = put_on_board(&mut engine, E, CardDefinition::creature("a", "A", 1, 1, 1));
    let b = put_on_board(&mut engine, E, CardDefinition::creature("b", "B", 1, 1, 4));
    let mine = put_on_board(&mut engine, P, CardDefinition::creature("m", "M", 1, 1, 1));
    let id = spell(&mut engine, Effect::damage(Selector::AllEnemies, 2));

    engine.play_card(P, id, None).unwrap();

    assert!(engine.state().creature(E, a).is_none());
    assert_eq!(creature_health(&engine, E, b), Some(2));
    assert_eq!(creature_health(&engine, P, mine), Some(1));
}

#[test]
fn test_buff_raises_max_health() {
    let mut engine = engine();
    let id = put_on_board(&mut engine, P, CardDefinition::creature("a", "A", 1, 2, 2));
    let s = spell(&mut engine, Effect::buff(Selector::AllFriendly, 1, 2));

    engine.play_card(P, s, None).unwrap();

    let creature = engine.state().creature(P, id).unwrap();
    assert_eq!(creature.current_attack, 3);
    assert_eq!(creature.current_health, 4);
    assert_eq!(creature.max_health, 4);
}

/// Spell damage to a hero floors at zero and can end the game.
#[test]
fn test_spell_damage_can_end_game() {
    let mut engine = engine();
    set_health(&mut engine, E, 2);
    let s = spell(&mut engine, Effect::damage(Selector::EnemyHero, 5));

    engine.play_card(P, s, None).unwrap();

    assert_eq!(engine.state().player(E).health, 0);
    assert_eq!(engine.state().winner, Some(P));
}

/// Guard protects the hero from targeted spells, not other creatures.
#[test]
fn test_guard_and_spell_targets() {
    let mut engine = engine();
    let plain = put_on_board(&mut engine, E, CardDefinition::creature("p", "P", 1, 1, 3));
    put_on_board(&mut engine, E, CardDefinition::creature("g", "G", 1, 1, 3).with_keyword(Keyword::Guard));
    set_mana(&mut engine, P, 5);
    let card = CardDefinition::spell("bolt", "Bolt", 1, Effect::damage(Selector::Target, 1)).with_target(TargetType::Enemy);
    let bolt = put_in_hand(&mut engine, P, card.clone());

    assert!(!engine.valid_targets(P, &card).contains(&Target::hero(E)));
    assert_eq!(engine.play_card(P, bolt, Some(Target::hero(E))), Err(ActionError::GuardPriority));
    engine.play_card(P, bolt, Some(Target::creature(E, plain))).unwrap();
    assert_eq!(creature_health(&engine, E, plain), Some(2));
}

// =============================================================================
// Composite effects
// =============================================================================

/// The creature dies in the sweep after the damage step, before the draw.
#[test]
fn test_multiple_sweeps_between_steps() {
    let mut engine = engine();
    let victim = put_on_board(&mut engine, E, CardDefinition::creature("v", "V", 1, 1, 2));
    set_mana(&mut engine, P, 5);
    let card = CardDefinition::spell(
        "combo",
        "Combo",
        2,
        Effect::multiple(vec![Effect::damage(Selector::Target, 3), Effect::draw(1)]),
    )
    .with_target(TargetType::EnemyCreature);
    let id = put_in_hand(&mut engine, P, card);
    let hand_before = engine.state().player(P).hand.len();
    let events = record(&mut engine);

    engine.play_card(P, id, Some(Target::creature(E, victim))).unwrap();

    assert!(engine.state().creature(E, victim).is_none());
    assert_eq!(engine.state().player(P).hand.len(), hand_before, "one card played, one drawn");

    let events = events.borrow();
    let died = events
        .iter()
        .position(|e| matches!(e, GameEvent::CreatureDied { instance_id, .. } if *instance_id == victim))
        .expect("victim died");
    let drew = events
        .iter()
        .position(|e| matches!(e, GameEvent::CardDrawn { player: PlayerId::Player, .. }))
        .expect("player drew");
    assert!(died < drew, "death must be resolved before the draw");
}

fn board_at_least_three() -> Condition {
    Condition::new(ConditionKind::BoardCount, Comparison::AtLeast, 3)
}

#[test]
fn test_conditional_takes_else_branch() {
    let mut engine = engine();
    put_on_board(&mut engine, P, CardDefinition::creature("a", "A", 1, 1, 1));
    put_on_board(&mut engine, P, CardDefinition::creature("b", "B", 1, 1, 1));
    let s = spell(
        &mut engine,
        Effect::conditional(
            board_at_least_three(),
            Effect::damage(Selector::EnemyHero, 10),
            Some(Effect::damage(Selector::EnemyHero, 1)),
        ),
    );

    engine.play_card(P, s, None).unwrap();
    assert_eq!(engine.state().player(E).health, 29);
}

#[test]
fn test_conditional_without_else_is_noop() {
    let mut engine = engine();
    put_on_board(&mut engine, P, CardDefinition::creature("a", "A", 1, 1, 1));
    put_on_board(&mut engine, P, CardDefinition::creature("b", "B", 1, 1, 1));
    let s = spell(
        &mut engine,
        Effect::conditional(board_at_least_three(), Effect::damage(Selector::EnemyHero, 10), None),
    );

    engine.play_card(P, s, None).unwrap();
    assert_eq!(engine.state().player(E).health, 30);
}

// =============================================================================
// Creature effects
// =============================================================================

#[test]
fn test_battlecry_buffs_itself() {
    let mut engine = engine();
    set_mana(&mut engine, P, 5);
    let id = put_in_hand(
        &mut engine,
        P,
        CardDefinition::creature("a", "A", 2, 1, 1).with_battlecry(Effect::buff(Selector::Source, 2, 2)),
    );

    engine.play_card(P, id, None).unwrap();

    let creature = engine.state().creature(P, id).unwrap();
    assert_eq!((creature.current_attack, creature.current_health), (3, 3));
}

#[test]
fn test_summon_respects_board_cap() {
    let mut engine = engine_with(RulesConfig::default().with_max_board_size(3));
    put_on_board(&mut engine, P, CardDefinition::creature("a", "A", 1, 1, 1));
    let s = spell(&mut engine, Effect::summon(CreatureForm::new("Whelp", 1, 1), 5));

    engine.play_card(P, s, None).unwrap();
    assert_eq!(engine.state().player(P).board.len(), 3);
}

/// Test that a summon trigger filling the board mid-summon truncates the
/// rest of the summon and the following steps still run.
#[test]
fn test_summon_truncated_by_summon_trigger() {
    let mut engine = engine_with(RulesConfig::default().with_max_board_size(3));
    let hatchery = CardDefinition::creature("h", "Hatchery", 2, 0, 5).with_ability(
        TriggeredAbility::new(Trigger::CreatureSummoned, Effect::summon(CreatureForm::new("Pup", 1, 1), 1)).for_owner(),
    );
    put_on_board(&mut engine, P, hatchery);

    let effect = Effect::multiple(vec![
        Effect::summon(CreatureForm::new("Egg", 0, 1), 2),
        Effect::heal(Selector::SelfHero, 5),
    ]);
    let result = EffectInterpreter::apply(engine.store_mut(), &effect, &EffectContext::new(P));

    assert!(result.is_success(), "got {:?}", result);
    let names: Vec<&str> = engine.state().player(P).board.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Hatchery", "Egg", "Pup"]);
    assert_eq!(engine.state().player(P).health, 35);
}

#[test]
fn test_extinct_fires_on_death() {
    let mut engine = engine();
    let bomb = CardDefinition::creature("bomb", "Bomb", 1, 0, 1).with_extinct(Effect::damage(Selector::EnemyHero, 3));
    let id = put_on_board(&mut engine, E, bomb);
    let s = spell(&mut engine, Effect::destroy(Selector::AllEnemies));

    engine.play_card(P, s, None).unwrap();

    assert!(engine.state().creature(E, id).is_none());
    assert_eq!(engine.state().player(P).health, 27, "extinct belongs to the dead creature's owner");
}

/// An extinct effect that kills another creature is swept in a later pass.
#[test]
fn test_extinct_chain() {
    let mut engine = engine();
    let second = put_on_board(&mut engine, P, CardDefinition::creature("s", "S", 1, 1, 1));
    let first = put_on_board(
        &mut engine,
        E,
        CardDefinition::creature("f", "F", 1, 0, 1).with_extinct(Effect::damage(Selector::AllEnemies, 1)),
    );
    let s = spell(&mut engine, Effect::damage(Selector::AllEnemies, 1));

    engine.play_card(P, s, None).unwrap();

    assert!(engine.state().creature(E, first).is_none());
    assert!(engine.state().creature(P, second).is_none());
}

#[test]
fn test_silence_removes_extinct() {
    let mut engine = engine();
    let bomb = CardDefinition::creature("bomb", "Bomb", 1, 0, 1).with_extinct(Effect::damage(Selector::EnemyHero, 3));
    put_on_board(&mut engine, E, bomb);
    let silence = spell(&mut engine, Effect::silence(Selector::AllEnemies));
    engine.play_card(P, silence, None).unwrap();

    let destroy = spell(&mut engine, Effect::destroy(Selector::AllEnemies));
    engine.play_card(P, destroy, None).unwrap();

    assert_eq!(engine.state().player(P).health, 30);
    assert!(engine.state().player(E).board.is_empty());
}

#[test]
fn test_transform() {
    let mut engine = engine();
    let id = put_on_board(
        &mut engine,
        E,
        CardDefinition::creature("big", "Big", 8, 8, 8).with_keyword(Keyword::Guard),
    );
    let s = spell(&mut engine, Effect::transform(Selector::AllEnemies, CreatureForm::new("Frog", 0, 1)));

    engine.play_card(P, s, None).unwrap();

    let frog = engine.state().creature(E, id).unwrap();
    assert_eq!(frog.name(), "Frog");
    assert_eq!((frog.current_attack, frog.current_health), (0, 1));
    assert!(!frog.has_guard());
    assert_eq!(frog.cost(), 8);
}

// =============================================================================
// Triggers and evolve
// =============================================================================

/// Owner-filtered abilities ignore the opponent's summons.
#[test]
fn test_summon_trigger_owner_filter() {
    let mut engine = engine();
    let watcher = CardDefinition::creature("w", "Watcher", 1, 1, 5).with_ability(
        TriggeredAbility::new(Trigger::CreatureSummoned, Effect::heal(Selector::SelfHero, 1)).for_owner(),
    );
    put_on_board(&mut engine, P, watcher);
    set_health(&mut engine, P, 10);
    set_mana(&mut engine, P, 5);
    let a = put_in_hand(&mut engine, P, CardDefinition::creature("a", "A", 1, 1, 1));
    engine.play_card(P, a, None).unwrap();
    assert_eq!(engine.state().player(P).health, 11);

    engine.end_turn().unwrap();
    set_mana(&mut engine, E, 5);
    let b = put_in_hand(&mut engine, E, CardDefinition::creature("b", "B", 1, 1, 1));
    engine.play_card(E, b, None).unwrap();
    assert_eq!(engine.state().player(P).health, 11);
}

/// A creature that draws whenever its owner draws stops at the depth bound.
#[test]
fn test_draw_loop_terminates() {
    let mut engine = engine_with(RulesConfig::default().with_max_trigger_depth(3));
    let looper = CardDefinition::creature("l", "Loop", 1, 1, 5)
        .with_ability(TriggeredAbility::new(Trigger::CardDrawn, Effect::draw(1)).for_owner());
    put_on_board(&mut engine, P, looper);
    let s = spell(&mut engine, Effect::draw(1));
    let hand_before = engine.state().player(P).hand.len();

    engine.play_card(P, s, None).unwrap();

    // One draw from the spell, then one per trigger level up to the bound.
    let drawn = engine.state().player(P).hand.len() + 1 - hand_before;
    assert_eq!(drawn, 4);
    assert!(!engine.state().game_over);
}

#[test]
fn test_evolve_after_board_grows() {
    let mut engine = engine();
    let egg = CardDefinition::creature("egg", "Egg", 1, 0, 2).with_evolve(
        Condition::new(ConditionKind::BoardCount, Comparison::AtLeast, 2),
        CreatureForm::new("Raptor", 4, 4).with_keyword(Keyword::Charge),
    );
    let id = put_on_board(&mut engine, P, egg);
    edit(&mut engine, |state| {
        let egg = state.player_mut(P).board.back_mut().unwrap();
        egg.current_health = 1;
    });
    set_mana(&mut engine, P, 5);
    let friend = put_in_hand(&mut engine, P, CardDefinition::creature("f", "F", 1, 1, 1));
    let events = record(&mut engine);

    engine.play_card(P, friend, None).unwrap();

    let raptor = engine.state().creature(P, id).unwrap();
    assert_eq!(raptor.name(), "Raptor");
    assert_eq!(raptor.current_attack, 4);
    assert_eq!(raptor.current_health, 3, "damage taken carries over");
    assert_eq!(raptor.max_health, 4);
    assert!(raptor.card.evolve.is_none());
    assert!(events
        .borrow()
        .iter()
        .any(|e| matches!(e, GameEvent::CreatureEvolved { instance_id, .. } if *instance_id == id)));
}

// =============================================================================
// Randomness
// =============================================================================

fn random_game(seed: u64) -> stonefire_engine::core::GameState {
    let mut engine = Engine::new(RulesConfig::default(), seed);
    engine.start_game(filler_deck("p", 20), filler_deck("e", 20)).unwrap();
    for i in 0..5 {
        put_on_board(&mut engine, E, CardDefinition::creature(format!("t{}", i), "T", 1, 0, 3));
    }
    let s = spell(&mut engine, Effect::multiple(vec![
        Effect::damage(Selector::RandomEnemyCreature, 2),
        Effect::damage(Selector::RANDOM_ENEMY_OR_HERO, 2),
        Effect::damage(Selector::RandomEnemyCreature, 2),
    ]));
    engine.play_card(P, s, None).unwrap();
    engine.state().clone()
}

/// Test that `random_enemy` only hits creatures, and does nothing on an
/// empty board, while `random_enemy_or_hero` can fall through to the hero.
#[test]
fn test_random_enemy_hero_inclusion() {
    let mut engine = engine();
    clear_board(&mut engine, E);

    let s = spell(&mut engine, Effect::damage(Selector::RANDOM_ENEMY, 2));
    engine.play_card(P, s, None).unwrap();
    assert_eq!(engine.state().player(E).health, 30);

    let s = spell(&mut engine, Effect::damage(Selector::RANDOM_ENEMY_OR_HERO, 2));
    engine.play_card(P, s, None).unwrap();
    assert_eq!(engine.state().player(E).health, 28);

    let target = put_on_board(&mut engine, E, CardDefinition::creature("t", "T", 1, 0, 5));
    for _ in 0..4 {
        let s = spell(&mut engine, Effect::damage(Selector::RANDOM_ENEMY, 1));
        engine.play_card(P, s, None).unwrap();
    }
    assert_eq!(creature_health(&engine, E, target), Some(1));
    assert_eq!(engine.state().player(E).health, 28);
}

/// Random selectors draw from the engine's seeded RNG.
#[test]
fn test_random_targets_follow_seed() {
    assert_eq!(random_game(11), random_game(11));
}
