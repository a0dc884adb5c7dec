//! Property tests: rule invariants under random command sequences.

mod common;

use proptest::prelude::*;

use stonefire_engine::cards::{CardDefinition, CreatureForm, Keyword};
use stonefire_engine::core::transition::effective_damage;
use stonefire_engine::core::{PlayerId, RulesConfig, Target};
use stonefire_engine::effects::{Effect, Selector};
use stonefire_engine::rules::Engine;

/// A deck that touches every keyword and most effects.
fn mixed_deck(prefix: &str) -> Vec<CardDefinition> {
    let id = |name: &str| format!("{}_{}", prefix, name);
    let cards = vec![
        CardDefinition::creature(id("grunt"), "Grunt", 1, 2, 1),
        CardDefinition::creature(id("wall"), "Wall", 2, 0, 4).with_keyword(Keyword::Guard),
        CardDefinition::creature(id("rusher"), "Rusher", 2, 2, 1).with_keyword(Keyword::Charge),
        CardDefinition::creature(id("viper"), "Viper", 2, 1, 2).with_keyword(Keyword::Venomous),
        CardDefinition::creature(id("shell"), "Shell", 3, 2, 3).with_keyword(Keyword::Armored(1)),
        CardDefinition::creature(id("nest"), "Nest", 2, 1, 1)
            .with_extinct(Effect::summon(CreatureForm::new("Hatchling", 1, 1), 2)),
        CardDefinition::spell(id("storm"), "Storm", 2, Effect::damage(Selector::AllCreatures, 1)),
        CardDefinition::spell(id("zap"), "Zap", 1, Effect::damage(Selector::RANDOM_ENEMY_OR_HERO, 2)),
        CardDefinition::spell(id("study"), "Study", 1, Effect::draw(3)),
        CardDefinition::relic(id("crystal"), "Crystal", 0, Effect::mana(2, 1)),
    ];
    cards.iter().cycle().take(30).cloned().collect()
}

#[derive(Clone, Debug)]
enum Command {
    EndTurn,
    Play(usize),
    Attack(usize, usize),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        1 => Just(Command::EndTurn),
        3 => (0usize..10).prop_map(Command::Play),
        2 => (0usize..8, 0usize..8).prop_map(|(a, d)| Command::Attack(a, d)),
    ]
}

/// Issue a command for the active player, picking cards and targets by
/// index. Rejected commands are fine; they must just change nothing.
fn run(engine: &mut Engine, command: &Command) {
    let player = engine.state().active_player;
    match *command {
        Command::EndTurn => {
            let _ = engine.end_turn();
        }
        Command::Play(i) => {
            let hand = &engine.state().player(player).hand;
            if hand.is_empty() {
                return;
            }
            let card = hand[i % hand.len()].clone();
            let target = engine.valid_targets(player, &card.card).first().copied();
            let before = engine.state().clone();
            if engine.play_card(player, card.instance_id, target).is_err() {
                assert_eq!(engine.state(), &before, "rejected play changed the state");
            }
        }
        Command::Attack(a, d) => {
            let board = engine.state().player(player).board_ids();
            let targets = engine.valid_attack_targets(player);
            if board.is_empty() || targets.is_empty() {
                return;
            }
            let before = engine.state().clone();
            if engine.attack(player, board[a % board.len()], targets[d % targets.len()]).is_err() {
                assert_eq!(engine.state(), &before, "rejected attack changed the state");
            }
        }
    }
}

fn check_invariants(engine: &Engine) {
    let state = engine.state();
    let config = engine.config();
    for player in PlayerId::all() {
        let side = state.player(player);
        assert!(side.health >= 0, "{} health {}", player, side.health);
        assert!(side.max_mana <= config.max_mana);
        assert!(side.mana <= config.max_mana);
        assert!(side.board.len() <= config.max_board_size);
        assert!(side.hand.len() <= config.max_hand_size);
        for creature in &side.board {
            assert_eq!(
                creature.can_attack,
                !creature.has_attacked
                    && creature.current_attack > 0
                    && (!creature.summoning_sick || creature.has_charge()),
                "stale can_attack on {}",
                creature.instance_id
            );
        }
    }
    if state.game_over {
        let winner = state.winner.expect("finished game has a winner");
        assert_eq!(state.player(winner.opponent()).health, 0);
    } else {
        assert!(state.dead_creatures().is_empty(), "dead creatures left after a command");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Armor never turns damage negative and never increases it.
    #[test]
    fn prop_armor_floor(amount in 0u32..100, armor in 0u32..100) {
        let dealt = effective_damage(amount, armor);
        prop_assert!(dealt <= amount);
        prop_assert_eq!(dealt, amount.saturating_sub(armor));
    }

    /// Board, hand, mana and health bounds hold and deaths are fully
    /// resolved after every command.
    #[test]
    fn prop_invariants_hold(seed in any::<u64>(), commands in prop::collection::vec(command(), 1..120)) {
        let mut engine = Engine::new(RulesConfig::default(), seed);
        engine.start_game(mixed_deck("p"), mixed_deck("e")).unwrap();
        check_invariants(&engine);

        let mut crystals = [0u32; 2];
        for command in &commands {
            if engine.state().game_over {
                break;
            }
            run(&mut engine, command);
            check_invariants(&engine);

            for player in PlayerId::all() {
                let max = engine.state().player(player).max_mana;
                prop_assert!(max >= crystals[player.index()], "mana crystals went down");
                crystals[player.index()] = max;
            }
        }
    }

    /// A game is a function of its seed and commands.
    #[test]
    fn prop_deterministic(seed in any::<u64>(), commands in prop::collection::vec(command(), 1..60)) {
        let play = || {
            let mut engine = Engine::new(RulesConfig::default(), seed);
            engine.start_game(mixed_deck("p"), mixed_deck("e")).unwrap();
            for command in &commands {
                run(&mut engine, command);
            }
            engine.state().clone()
        };
        prop_assert_eq!(play(), play());
    }

    /// Replaying the recorded actions rebuilds the live state.
    #[test]
    fn prop_replay_matches(seed in any::<u64>(), commands in prop::collection::vec(command(), 1..60)) {
        let mut engine = Engine::new(RulesConfig::default(), seed);
        engine.start_game(mixed_deck("p"), mixed_deck("e")).unwrap();
        for command in &commands {
            run(&mut engine, command);
        }

        let rebuilt = stonefire_engine::core::store::replay(engine.config().clone(), engine.history().iter()).unwrap();
        prop_assert_eq!(&rebuilt, engine.state());
    }

    /// Every legal attack target respects Guard.
    #[test]
    fn prop_guard_targets(guards in 0usize..3, others in 0usize..4) {
        let mut engine = common::engine();
        for i in 0..guards {
            common::put_on_board(&mut engine, PlayerId::Enemy, CardDefinition::creature(format!("g{}", i), "G", 1, 1, 3).with_keyword(Keyword::Guard));
        }
        for i in 0..others {
            common::put_on_board(&mut engine, PlayerId::Enemy, CardDefinition::creature(format!("o{}", i), "O", 1, 1, 3));
        }

        let targets = engine.valid_attack_targets(PlayerId::Player);
        if guards > 0 {
            prop_assert_eq!(targets.len(), guards);
            prop_assert!(!targets.contains(&Target::hero(PlayerId::Enemy)));
        } else {
            prop_assert_eq!(targets.len(), others + 1);
        }
    }
}
