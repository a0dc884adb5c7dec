//! The transition function: `(state, action) -> new state`.
//!
//! `apply` is pure. It never mutates its input, never draws randomness and
//! never calls listeners; it returns the next snapshot together with the
//! observation events and trigger occurrences the action produced. The
//! `Store` decides what to do with them.
//!
//! Validation happens before anything is changed, so a rejected action
//! leaves no trace.

use super::action::Action;
use super::config::RulesConfig;
use super::entity::Target;
use super::player::PlayerId;
use super::state::{GameState, Phase};
use crate::cards::{CardInstance, CardType};
use crate::error::ActionError;
use crate::triggers::{GameEvent, Trigger, TriggerEvent};

/// Result of applying one action.
#[derive(Clone, Debug)]
pub struct Transition {
    /// The next snapshot.
    pub state: GameState,

    /// Observation events, in the order they happened.
    pub events: Vec<GameEvent>,

    /// Trigger occurrences for the effect interpreter.
    pub triggers: Vec<TriggerEvent>,
}

impl Transition {
    fn new(state: GameState) -> Self {
        Self {
            state,
            events: Vec::new(),
            triggers: Vec::new(),
        }
    }
}

/// Damage left after armor. Never negative.
///
/// ```
/// use stonefire_engine::core::transition::effective_damage;
///
/// assert_eq!(effective_damage(3, 2), 1);
/// assert_eq!(effective_damage(2, 5), 0);
/// ```
#[must_use]
pub const fn effective_damage(amount: u32, armor: u32) -> u32 {
    amount.saturating_sub(armor)
}

/// A damage or heal amount as a health delta, saturating at `i32::MAX`.
#[must_use]
pub fn health_delta(amount: u32) -> i32 {
    i32::try_from(amount).unwrap_or(i32::MAX)
}

/// Apply `action` to `state`.
pub fn apply(state: &GameState, action: &Action, config: &RulesConfig) -> Result<Transition, ActionError> {
    if state.game_over && !matches!(action, Action::StartGame { .. }) {
        return Err(ActionError::GameOver);
    }

    let mut next = Transition::new(state.clone());
    let s = &mut next.state;

    match action {
        Action::StartGame { player_deck, enemy_deck } => {
            let mut fresh = GameState::new(config);
            for (player, deck) in [(PlayerId::Player, player_deck), (PlayerId::Enemy, enemy_deck)] {
                for card in deck {
                    let id = fresh.allocate_id();
                    fresh.player_mut(player).deck.push_back(CardInstance::new(id, card.clone()));
                }
            }
            *s = fresh;
        }

        Action::StartTurn { player } => {
            if *player == config.first_player {
                s.turn += 1;
            }
            let side = s.player_mut(*player);
            side.max_mana = (side.max_mana + 1).min(config.max_mana);
            side.mana = side.max_mana;
            for creature in side.board.iter_mut() {
                creature.ready();
            }
            s.active_player = *player;
            s.phase = Phase::Main;
        }

        Action::EndTurn => {
            s.phase = Phase::End;
        }

        Action::DrawCard { player } => {
            let side = s.player_mut(*player);
            match side.deck.pop_front() {
                None => log::trace!("{} draws from an empty deck", player),
                Some(card) if side.hand.len() >= config.max_hand_size => {
                    next.events.push(GameEvent::CardBurned {
                        player: *player,
                        card: card.card_id().clone(),
                    });
                    side.graveyard.push_back(card);
                }
                Some(card) => {
                    let id = card.instance_id;
                    side.hand.push_back(card);
                    next.events.push(GameEvent::CardDrawn { player: *player, instance_id: id });
                    next.triggers.push(TriggerEvent::new(Trigger::CardDrawn, *player).with_subject(id));
                }
            }
        }

        Action::PlayCard { player, instance_id, .. } => {
            if s.active_player != *player {
                return Err(ActionError::NotYourTurn(*player));
            }
            let side = s.player_mut(*player);
            let index = side
                .hand
                .iter()
                .position(|c| c.instance_id == *instance_id)
                .ok_or(ActionError::CardNotInHand(*instance_id))?;
            let cost = side.hand[index].cost();
            if cost > side.mana {
                return Err(ActionError::InsufficientMana { cost, available: side.mana });
            }
            let card_type = side.hand[index].card.card_type;
            if card_type == CardType::Creature && side.board.len() >= config.max_board_size {
                return Err(ActionError::BoardFull);
            }

            side.mana -= cost;
            let mut card = side.hand.remove(index);
            match card_type {
                CardType::Creature => {
                    card.enter_board();
                    side.board.push_back(card);
                    next.events.push(GameEvent::CreatureSummoned { player: *player, instance_id: *instance_id });
                    next.triggers.push(
                        TriggerEvent::new(Trigger::CreatureSummoned, *player).with_subject(*instance_id),
                    );
                }
                CardType::Spell => {
                    next.events.push(GameEvent::SpellCast { player: *player, card: card.card_id().clone() });
                    side.graveyard.push_back(card);
                }
                CardType::Relic => {
                    next.events.push(GameEvent::RelicPlayed { player: *player, card: card.card_id().clone() });
                    side.graveyard.push_back(card);
                }
            }
        }

        Action::Attack { player, attacker } => {
            if s.active_player != *player {
                return Err(ActionError::NotYourTurn(*player));
            }
            let side = s.player_mut(*player);
            let creature = side
                .board
                .iter_mut()
                .find(|c| c.instance_id == *attacker)
                .ok_or(ActionError::AttackerNotFound(*attacker))?;
            if !creature.can_attack {
                return Err(ActionError::CannotAttack(*attacker));
            }
            creature.has_attacked = true;
            creature.refresh_can_attack();
            s.phase = Phase::Combat;
        }

        Action::DealDamage { target, amount } => match *target {
            Target::Hero(player) => {
                let side = s.player_mut(player);
                side.health = side.health.saturating_sub(health_delta(*amount)).max(0);
                let dead = side.health == 0;
                next.events.push(GameEvent::HeroDamaged { player, amount: *amount });
                if dead {
                    s.game_over = true;
                    s.winner = Some(player.opponent());
                    next.events.push(GameEvent::GameOver { winner: player.opponent() });
                }
            }
            Target::Creature(player, id) => {
                match s.player_mut(player).board.iter_mut().find(|c| c.instance_id == id) {
                    Some(creature) => {
                        let dealt = effective_damage(*amount, creature.armor());
                        creature.current_health = creature.current_health.saturating_sub(health_delta(dealt));
                        next.events.push(GameEvent::DamageDealt { target: *target, amount: dealt });
                    }
                    None => log::trace!("damage to missing {}", target),
                }
            }
        },

        Action::Heal { target, amount } => {
            match *target {
                Target::Hero(player) => {
                    let side = s.player_mut(player);
                    side.health = side.health.saturating_add(health_delta(*amount));
                }
                Target::Creature(player, id) => {
                    match s.player_mut(player).board.iter_mut().find(|c| c.instance_id == id) {
                        Some(creature) => {
                            creature.current_health = creature.current_health.saturating_add(health_delta(*amount));
                        }
                        None => {
                            log::trace!("heal on missing {}", target);
                            return Ok(next);
                        }
                    }
                }
            }
            next.events.push(GameEvent::HealApplied { target: *target, amount: *amount });
        }

        Action::DestroyCreature { player, instance_id } => {
            let side = s.player_mut(*player);
            match side.creature_index(*instance_id) {
                Some(index) => {
                    let card = side.board.remove(index);
                    next.events.push(GameEvent::CreatureDied {
                        player: *player,
                        instance_id: *instance_id,
                        card: card.card_id().clone(),
                    });
                    side.graveyard.push_back(card);
                }
                None => log::trace!("destroy on missing {}", instance_id),
            }
        }

        Action::SummonCreature { player, card } => {
            if s.player(*player).board.len() >= config.max_board_size {
                return Err(ActionError::BoardFull);
            }
            let id = s.allocate_id();
            let mut creature = CardInstance::new(id, card.clone());
            creature.enter_board();
            s.player_mut(*player).board.push_back(creature);
            next.events.push(GameEvent::CreatureSummoned { player: *player, instance_id: id });
            next.triggers.push(TriggerEvent::new(Trigger::CreatureSummoned, *player).with_subject(id));
        }

        Action::ModifyCreature { player, instance_id, changes } => {
            match s.player_mut(*player).board.iter_mut().find(|c| c.instance_id == *instance_id) {
                Some(creature) => creature.apply_changes(changes),
                None => log::trace!("modify on missing {}", instance_id),
            }
        }

        Action::ModifyMana { player, current, max } => {
            let side = s.player_mut(*player);
            if let Some(max) = max {
                side.max_mana = (*max).min(config.max_mana);
            }
            if let Some(current) = current {
                side.mana = (*current).min(config.max_mana);
            }
        }

        Action::SetGameOver { winner } => {
            s.game_over = true;
            s.winner = Some(*winner);
            next.events.push(GameEvent::GameOver { winner: *winner });
        }

        Action::SetSelection { selection } => {
            s.selection = selection.clone();
        }

        Action::ClearSelection => {
            s.selection = Default::default();
        }
    }

    Ok(next)
}
