//! Game state snapshot.
//!
//! ## GameState
//!
//! The root snapshot, owned by the `Store`:
//! - Turn number, active player, phase
//! - Game-over flag and winner
//! - Both `PlayerState`s
//! - The UI selection
//! - The instance id counter
//!
//! ## PlayerState
//!
//! One side's hero health, mana, and card zones (hand, board, deck,
//! graveyard).
//!
//! Zones are `im` persistent vectors, so cloning a state is cheap and each
//! transition can build a new snapshot instead of mutating the old one.
//! The whole snapshot is plain serde data.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::RulesConfig;
use super::entity::{InstanceId, Target};
use super::player::{PlayerId, PlayerMap};
use crate::cards::CardInstance;

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Main,
    Combat,
    End,
}

/// What the UI currently has selected. Not read by any rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Card selected in hand.
    pub card: Option<InstanceId>,
    /// Creature selected to attack with.
    pub attacker: Option<InstanceId>,
    /// Highlighted target.
    pub target: Option<Target>,
}

impl Selection {
    #[must_use]
    pub fn card(id: InstanceId) -> Self {
        Self {
            card: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attacker(id: InstanceId) -> Self {
        Self {
            attacker: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One side of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Hero health. Floored at 0; may exceed `max_health` through healing.
    pub health: i32,
    pub max_health: i32,
    pub mana: u32,
    pub max_mana: u32,
    pub hand: Vector<CardInstance>,
    /// Board order is display order only.
    pub board: Vector<CardInstance>,
    /// Front of the deck is drawn first.
    pub deck: Vector<CardInstance>,
    pub graveyard: Vector<CardInstance>,
}

impl PlayerState {
    /// Create a side with full health and empty zones.
    #[must_use]
    pub fn new(health: i32) -> Self {
        Self {
            health,
            max_health: health,
            mana: 0,
            max_mana: 0,
            hand: Vector::new(),
            board: Vector::new(),
            deck: Vector::new(),
            graveyard: Vector::new(),
        }
    }

    /// Find a creature on the board.
    #[must_use]
    pub fn creature(&self, id: InstanceId) -> Option<&CardInstance> {
        self.board.iter().find(|c| c.instance_id == id)
    }

    /// Board position of a creature.
    #[must_use]
    pub fn creature_index(&self, id: InstanceId) -> Option<usize> {
        self.board.iter().position(|c| c.instance_id == id)
    }

    /// Find a card in hand.
    #[must_use]
    pub fn hand_card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.instance_id == id)
    }

    /// Does any creature on this board have Guard?
    #[must_use]
    pub fn has_guard(&self) -> bool {
        self.board.iter().any(CardInstance::has_guard)
    }

    /// Creature ids in board order.
    #[must_use]
    pub fn board_ids(&self) -> Vec<InstanceId> {
        self.board.iter().map(|c| c.instance_id).collect()
    }
}

/// The complete game snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Turn number. 0 before the first turn; increments when the first
    /// player's turn starts.
    pub turn: u32,

    /// Whose turn it is.
    pub active_player: PlayerId,

    pub phase: Phase,

    /// Once set, only `StartGame` is accepted.
    pub game_over: bool,

    pub winner: Option<PlayerId>,

    pub players: PlayerMap<PlayerState>,

    pub selection: Selection,

    /// Next instance id to allocate.
    pub next_instance_id: u32,
}

impl GameState {
    /// Create an empty pre-game state.
    #[must_use]
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            turn: 0,
            active_player: config.first_player,
            phase: Phase::Main,
            game_over: false,
            winner: None,
            players: PlayerMap::new(|_| PlayerState::new(config.starting_health)),
            selection: Selection::default(),
            next_instance_id: 1,
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// Find a creature on `player`'s board.
    #[must_use]
    pub fn creature(&self, player: PlayerId, id: InstanceId) -> Option<&CardInstance> {
        self.players[player].creature(id)
    }

    /// Find a creature on either board.
    #[must_use]
    pub fn find_creature(&self, id: InstanceId) -> Option<(PlayerId, &CardInstance)> {
        self.players
            .iter()
            .find_map(|(player, state)| state.creature(id).map(|c| (player, c)))
    }

    /// Does the target still exist?
    #[must_use]
    pub fn target_exists(&self, target: Target) -> bool {
        match target {
            Target::Hero(_) => true,
            Target::Creature(player, id) => self.creature(player, id).is_some(),
        }
    }

    /// Is it `player`'s turn in a live game?
    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        !self.game_over && self.active_player == player
    }

    /// Every creature with nonpositive health or marked for death, in
    /// resolution order (`Player` board first, then board order).
    #[must_use]
    pub fn dead_creatures(&self) -> Vec<(PlayerId, InstanceId)> {
        self.players
            .iter()
            .flat_map(|(player, state)| {
                state
                    .board
                    .iter()
                    .filter(|c| c.is_dead())
                    .map(move |c| (player, c.instance_id))
            })
            .collect()
    }

    /// Allocate a fresh instance id.
    pub fn allocate_id(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_instance_id);
        self.next_instance_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, Keyword};

    fn instance(state: &mut GameState, card: CardDefinition) -> CardInstance {
        let id = state.allocate_id();
        let mut inst = CardInstance::new(id, card);
        inst.enter_board();
        inst
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(&RulesConfig::default());
        assert_eq!(state.turn, 0);
        assert_eq!(state.active_player, PlayerId::Player);
        assert!(!state.game_over);
        assert_eq!(state.player(PlayerId::Enemy).health, 30);
        assert_eq!(state.player(PlayerId::Enemy).max_mana, 0);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_allocate_id_is_unique() {
        let mut state = GameState::new(&RulesConfig::default());
        let a = state.allocate_id();
        let b = state.allocate_id();
        assert_ne!(a, b);
        assert_eq!(state.next_instance_id, 3);
    }

    #[test]
    fn test_find_creature() {
        let mut state = GameState::new(&RulesConfig::default());
        let wolf = instance(&mut state, CardDefinition::creature("w", "Wolf", 2, 2, 2));
        let id = wolf.instance_id;
        state.player_mut(PlayerId::Enemy).board.push_back(wolf);

        assert!(state.creature(PlayerId::Player, id).is_none());
        let (owner, found) = state.find_creature(id).unwrap();
        assert_eq!(owner, PlayerId::Enemy);
        assert_eq!(found.name(), "Wolf");
        assert!(state.target_exists(Target::creature(PlayerId::Enemy, id)));
        assert!(!state.target_exists(Target::creature(PlayerId::Player, id)));
    }

    #[test]
    fn test_has_guard() {
        let mut state = GameState::new(&RulesConfig::default());
        let wall = instance(
            &mut state,
            CardDefinition::creature("g", "Wall", 2, 0, 4).with_keyword(Keyword::Guard),
        );
        assert!(!state.player(PlayerId::Player).has_guard());
        state.player_mut(PlayerId::Player).board.push_back(wall);
        assert!(state.player(PlayerId::Player).has_guard());
    }

    #[test]
    fn test_dead_creatures_order() {
        let mut state = GameState::new(&RulesConfig::default());
        let mut a = instance(&mut state, CardDefinition::creature("a", "A", 1, 1, 1));
        let mut b = instance(&mut state, CardDefinition::creature("b", "B", 1, 1, 1));
        let c = instance(&mut state, CardDefinition::creature("c", "C", 1, 1, 1));
        a.current_health = 0;
        b.marked_for_death = true;
        let (a_id, b_id) = (a.instance_id, b.instance_id);

        state.player_mut(PlayerId::Enemy).board.push_back(a);
        state.player_mut(PlayerId::Player).board.push_back(c);
        state.player_mut(PlayerId::Player).board.push_back(b);

        assert_eq!(
            state.dead_creatures(),
            vec![(PlayerId::Player, b_id), (PlayerId::Enemy, a_id)]
        );
    }

    #[test]
    fn test_state_json_round_trip() {
        let mut state = GameState::new(&RulesConfig::default());
        let card = instance(&mut state, CardDefinition::creature("a", "A", 1, 1, 1));
        state.player_mut(PlayerId::Player).hand.push_back(card);
        state.selection = Selection::card(InstanceId::new(1));

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
