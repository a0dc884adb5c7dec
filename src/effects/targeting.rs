//! Target resolution.
//!
//! Selectors are resolved against the state as it is when the effect
//! runs, so a later step of a `Multiple` effect sees the board left by the
//! earlier steps. Multi-target selectors return targets in resolution
//! order: friendly board before enemy board for `AllCreatures`, board
//! order within a side.
//!
//! This module also holds the Guard rules shared by attack validation,
//! card targeting and the read-only queries.

use smallvec::SmallVec;

use super::effect::Selector;
use super::interpreter::EffectContext;
use crate::cards::TargetType;
use crate::core::{GameRng, GameState, PlayerId, Target};

/// Targets picked by one selector. Boards hold at most a handful of
/// creatures, so this stays inline.
pub type Targets = SmallVec<[Target; 8]>;

fn board_targets(state: &GameState, player: PlayerId) -> impl Iterator<Item = Target> + '_ {
    state
        .player(player)
        .board
        .iter()
        .map(move |c| Target::creature(player, c.instance_id))
}

fn pick(rng: &mut GameRng, pool: &[Target]) -> Targets {
    rng.choose(pool).copied().into_iter().collect()
}

/// Resolve a selector against the live state.
///
/// Stale references (a chosen target or source that has since left the
/// board) resolve to nothing.
pub fn resolve(selector: Selector, state: &GameState, ctx: &EffectContext, rng: &mut GameRng) -> Targets {
    let me = ctx.source_player;
    let them = me.opponent();

    match selector {
        Selector::Target => ctx
            .target
            .filter(|t| state.target_exists(*t))
            .into_iter()
            .collect(),
        Selector::Source => ctx
            .source
            .and_then(|id| state.find_creature(id).map(|(owner, _)| Target::creature(owner, id)))
            .into_iter()
            .collect(),
        Selector::Attacker => ctx
            .attacker
            .filter(|t| state.target_exists(*t))
            .into_iter()
            .collect(),
        Selector::AllEnemies => board_targets(state, them).collect(),
        Selector::AllFriendly => board_targets(state, me).collect(),
        Selector::AllCreatures => board_targets(state, me).chain(board_targets(state, them)).collect(),
        Selector::SelfHero => std::iter::once(Target::hero(me)).collect(),
        Selector::EnemyHero => std::iter::once(Target::hero(them)).collect(),
        Selector::RandomEnemy { include_hero } => {
            let hero = include_hero.then(|| Target::hero(them));
            let pool: Targets = board_targets(state, them).chain(hero).collect();
            pick(rng, &pool)
        }
        Selector::RandomEnemyCreature => {
            let pool: Targets = board_targets(state, them).collect();
            pick(rng, &pool)
        }
        Selector::RandomFriendly => {
            let pool: Targets = board_targets(state, me).collect();
            pick(rng, &pool)
        }
        Selector::LowestHealth => state
            .player(them)
            .board
            .iter()
            .min_by_key(|c| c.current_health)
            .map(|c| Target::creature(them, c.instance_id))
            .into_iter()
            .collect(),
    }
}

/// Everything a card with `target_type` played by `player` could be aimed
/// at, before Guard is considered.
#[must_use]
pub fn candidates(target_type: TargetType, state: &GameState, player: PlayerId) -> Vec<Target> {
    let them = player.opponent();
    match target_type {
        TargetType::EnemyCreature => board_targets(state, them).collect(),
        TargetType::FriendlyCreature => board_targets(state, player).collect(),
        TargetType::AnyCreature => PlayerId::all().flat_map(|p| board_targets(state, p)).collect(),
        TargetType::Enemy => board_targets(state, them).chain(std::iter::once(Target::hero(them))).collect(),
        TargetType::Any => PlayerId::all()
            .flat_map(|p| board_targets(state, p).chain(std::iter::once(Target::hero(p))))
            .collect(),
        TargetType::Hero => vec![Target::hero(them)],
    }
}

/// Would `player` break Guard priority by aiming a card at `target`?
///
/// Only the opposing hero is protected; Guard does not stop spells from
/// hitting other creatures.
#[must_use]
pub fn card_target_blocked_by_guard(state: &GameState, player: PlayerId, target: Target) -> bool {
    target == Target::hero(player.opponent()) && state.player(player.opponent()).has_guard()
}

/// Would `attacker_player` break Guard priority by attacking `target`?
#[must_use]
pub fn attack_blocked_by_guard(state: &GameState, attacker_player: PlayerId, target: Target) -> bool {
    let defender = state.player(target.player());
    if target.player() == attacker_player || !defender.has_guard() {
        return false;
    }
    match target {
        Target::Hero(_) => true,
        Target::Creature(_, id) => !defender.creature(id).is_some_and(|c| c.has_guard()),
    }
}

/// Legal attack targets for `attacker_player`: the opposing Guards if any
/// exist, otherwise every opposing creature plus the hero.
#[must_use]
pub fn attack_targets(state: &GameState, attacker_player: PlayerId) -> Vec<Target> {
    let them = attacker_player.opponent();
    let defender = state.player(them);
    if defender.has_guard() {
        defender
            .board
            .iter()
            .filter(|c| c.has_guard())
            .map(|c| Target::creature(them, c.instance_id))
            .collect()
    } else {
        board_targets(state, them).chain(std::iter::once(Target::hero(them))).collect()
    }
}
