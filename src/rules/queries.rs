//! Read-only rule checks.
//!
//! The `validate_*` functions are the command preconditions; the `can_*`
//! and `valid_*` queries are what a UI or AI asks before issuing a command.
//! None of them touch the state.

use crate::cards::{CardDefinition, CardType};
use crate::core::{GameState, InstanceId, PlayerId, RulesConfig, Target};
use crate::effects::targeting;
use crate::error::ActionError;

/// Check that `player` may play `instance_id` at `target`.
///
/// Checks, in order: game over, turn, hand, mana, board space, target
/// requirement, target validity, Guard priority.
pub fn validate_play(
    state: &GameState,
    config: &RulesConfig,
    player: PlayerId,
    instance_id: InstanceId,
    target: Option<Target>,
) -> Result<(), ActionError> {
    if state.game_over {
        return Err(ActionError::GameOver);
    }
    if state.active_player != player {
        return Err(ActionError::NotYourTurn(player));
    }
    let side = state.player(player);
    let card = side.hand_card(instance_id).ok_or(ActionError::CardNotInHand(instance_id))?;
    if card.cost() > side.mana {
        return Err(ActionError::InsufficientMana {
            cost: card.cost(),
            available: side.mana,
        });
    }
    if card.card.card_type == CardType::Creature && side.board.len() >= config.max_board_size {
        return Err(ActionError::BoardFull);
    }
    validate_card_target(state, player, &card.card, target)
}

fn validate_card_target(
    state: &GameState,
    player: PlayerId,
    card: &CardDefinition,
    target: Option<Target>,
) -> Result<(), ActionError> {
    let Some(target) = target else {
        return if card.requires_target {
            Err(ActionError::TargetRequired)
        } else {
            Ok(())
        };
    };

    if !state.target_exists(target) {
        return Err(ActionError::InvalidTarget(target));
    }
    if let Some(target_type) = card.target_type {
        if !targeting::candidates(target_type, state, player).contains(&target) {
            return Err(ActionError::InvalidTarget(target));
        }
    }
    if targeting::card_target_blocked_by_guard(state, player, target) {
        return Err(ActionError::GuardPriority);
    }
    Ok(())
}

/// Check that `attacker` (on `player`'s board) may attack `defender`.
pub fn validate_attack(
    state: &GameState,
    player: PlayerId,
    attacker: InstanceId,
    defender: Target,
) -> Result<(), ActionError> {
    if state.game_over {
        return Err(ActionError::GameOver);
    }
    if state.active_player != player {
        return Err(ActionError::NotYourTurn(player));
    }
    let creature = state
        .creature(player, attacker)
        .ok_or(ActionError::AttackerNotFound(attacker))?;
    if !creature.can_attack {
        return Err(ActionError::CannotAttack(attacker));
    }
    if defender.player() == player || !state.target_exists(defender) {
        return Err(ActionError::InvalidTarget(defender));
    }
    if targeting::attack_blocked_by_guard(state, player, defender) {
        return Err(ActionError::GuardPriority);
    }
    Ok(())
}

/// Could `player` play this card from hand right now, ignoring targets?
#[must_use]
pub fn can_play_card(state: &GameState, config: &RulesConfig, player: PlayerId, instance_id: InstanceId) -> bool {
    if !state.is_active(player) {
        return false;
    }
    let side = state.player(player);
    side.hand_card(instance_id).is_some_and(|card| {
        card.cost() <= side.mana
            && (card.card.card_type != CardType::Creature || side.board.len() < config.max_board_size)
    })
}

/// Could this creature attack something right now?
#[must_use]
pub fn can_creature_attack(state: &GameState, player: PlayerId, instance_id: InstanceId) -> bool {
    state.is_active(player) && state.creature(player, instance_id).is_some_and(|c| c.can_attack)
}

/// Legal explicit targets for `card` played by `player`, Guard included.
/// Empty when the card takes no target.
#[must_use]
pub fn valid_targets(state: &GameState, player: PlayerId, card: &CardDefinition) -> Vec<Target> {
    let Some(target_type) = card.target_type else {
        return Vec::new();
    };
    targeting::candidates(target_type, state, player)
        .into_iter()
        .filter(|t| !targeting::card_target_blocked_by_guard(state, player, *t))
        .collect()
}

/// Legal attack targets for `player`'s creatures.
#[must_use]
pub fn valid_attack_targets(state: &GameState, player: PlayerId) -> Vec<Target> {
    targeting::attack_targets(state, player)
}
