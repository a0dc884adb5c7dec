use crate::core::transition::{effective_damage, health_delta};
use crate::core::{Action, CreatureChanges, GameState, InstanceId, PlayerId, Store, Target};
use crate::effects::{targeting, EffectInterpreter};
use crate::triggers::{GameEvent, Trigger, TriggerEvent};

/// Expected outcome of an attack, computed without touching the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatPreview {
    /// Damage the attacker deals, after the defender's armor.
    pub attacker_damage: u32,
    /// Damage the defender deals back. Always 0 against a hero.
    pub defender_damage: u32,
    pub attacker_health_after: i32,
    pub defender_health_after: i32,
    pub attacker_survives: bool,
    pub defender_survives: bool,
    pub attacker_killed_by_venom: bool,
    pub defender_killed_by_venom: bool,
}

/// Resolves attacks against the `Store`.
pub struct CombatResolver;

impl CombatResolver {
    /// Preview `attacker_id` (on `attacker_player`'s board) attacking
    /// `defender`. `None` if either side is missing.
    #[must_use]
    pub fn preview_combat(
        state: &GameState,
        attacker_player: PlayerId,
        attacker_id: InstanceId,
        defender: Target,
    ) -> Option<CombatPreview> {
        let attacker = state.creature(attacker_player, attacker_id)?;

        match defender {
            Target::Hero(player) => {
                let damage = attacker.attack_damage();
                let health_after = state.player(player).health.saturating_sub(health_delta(damage));
                Some(CombatPreview {
                    attacker_damage: damage,
                    defender_damage: 0,
                    attacker_health_after: attacker.current_health,
                    defender_health_after: health_after,
                    attacker_survives: true,
                    defender_survives: health_after > 0,
                    attacker_killed_by_venom: false,
                    defender_killed_by_venom: false,
                })
            }
            Target::Creature(player, id) => {
                let target = state.creature(player, id)?;
                let attacker_damage = effective_damage(attacker.attack_damage(), target.armor());
                let defender_damage = effective_damage(target.attack_damage(), attacker.armor());

                let attacker_killed_by_venom = defender_damage > 0 && target.is_venomous();
                let defender_killed_by_venom = attacker_damage > 0 && attacker.is_venomous();

                let attacker_health_after = if attacker_killed_by_venom {
                    0
                } else {
                    attacker.current_health.saturating_sub(health_delta(defender_damage))
                };
                let defender_health_after = if defender_killed_by_venom {
                    0
                } else {
                    target.current_health.saturating_sub(health_delta(attacker_damage))
                };

                Some(CombatPreview {
                    attacker_damage,
                    defender_damage,
                    attacker_health_after,
                    defender_health_after,
                    attacker_survives: attacker_health_after > 0,
                    defender_survives: defender_health_after > 0,
                    attacker_killed_by_venom,
                    defender_killed_by_venom,
                })
            }
        }
    }

    /// Could `player` kill the opposing hero this turn with the creatures
    /// that are ready to attack it?
    #[must_use]
    pub fn would_be_lethal(state: &GameState, player: PlayerId) -> bool {
        let hero = Target::hero(player.opponent());
        if targeting::attack_blocked_by_guard(state, player, hero) {
            return state.player(player.opponent()).health <= 0;
        }
        let total: i64 = state
            .player(player)
            .board
            .iter()
            .filter(|c| c.can_attack)
            .map(|c| i64::from(c.current_attack))
            .sum();
        total >= i64::from(state.player(player.opponent()).health)
    }

    /// Resolve an attack that has already been validated and dispatched.
    ///
    /// Returns false, changing nothing, if the attacker or defending
    /// creature is no longer on the board.
    pub fn resolve_combat(store: &mut Store, attacker_player: PlayerId, attacker_id: InstanceId, defender: Target) -> bool {
        let Some(preview) = Self::preview_combat(store.state(), attacker_player, attacker_id, defender) else {
            log::trace!("combat between {} and {} skipped: missing side", attacker_id, defender);
            return false;
        };
        let attacker = Target::creature(attacker_player, attacker_id);
        store.emit(GameEvent::AttackStarted { attacker, defender });

        match defender {
            Target::Hero(_) => Self::hit_hero(store, attacker, defender, preview),
            Target::Creature(..) => Self::clash(store, attacker, defender, preview),
        }
        true
    }

    fn hit_hero(store: &mut Store, attacker: Target, hero: Target, preview: CombatPreview) {
        if preview.attacker_damage > 0
            && store
                .dispatch(Action::DealDamage { target: hero, amount: preview.attacker_damage })
                .is_err()
        {
            return;
        }
        log::debug!("{} hits {} for {}", attacker, hero, preview.attacker_damage);
        store.emit(GameEvent::CombatResolved {
            attacker,
            defender: hero,
            attacker_damage: preview.attacker_damage,
            defender_damage: 0,
        });
    }

    fn clash(store: &mut Store, attacker: Target, defender: Target, preview: CombatPreview) {
        let attacker_raw = attack_of(store.state(), attacker);
        let defender_raw = attack_of(store.state(), defender);

        // Armor is applied by DealDamage; defender is hit first.
        for (target, amount) in [(defender, attacker_raw), (attacker, defender_raw)] {
            if amount > 0 && store.dispatch(Action::DealDamage { target, amount }).is_err() {
                return;
            }
        }

        // Damage triggers see the hit before Venomous is applied.
        if preview.attacker_damage > 0 {
            Self::took_damage(store, defender, attacker);
        }
        if preview.defender_damage > 0 {
            Self::took_damage(store, attacker, defender);
        }

        if preview.defender_killed_by_venom {
            Self::venom(store, attacker, defender);
        }
        if preview.attacker_killed_by_venom {
            Self::venom(store, defender, attacker);
        }

        log::debug!(
            "{} and {} trade {} / {}",
            attacker,
            defender,
            preview.attacker_damage,
            preview.defender_damage
        );
        store.emit(GameEvent::CombatResolved {
            attacker,
            defender,
            attacker_damage: preview.attacker_damage,
            defender_damage: preview.defender_damage,
        });
    }

    /// Venomous sets the victim's health to 0 if damage left it alive.
    fn venom(store: &mut Store, source: Target, victim: Target) {
        let Target::Creature(player, instance_id) = victim else {
            return;
        };
        let alive = store
            .state()
            .creature(player, instance_id)
            .is_some_and(|c| c.current_health > 0);
        if !alive {
            return;
        }
        let changes = CreatureChanges::new().with_health(0);
        if store.dispatch(Action::ModifyCreature { player, instance_id, changes }).is_ok() {
            store.emit(GameEvent::VenomousTriggered { source, victim });
        }
    }

    fn took_damage(store: &mut Store, damaged: Target, by: Target) {
        let Target::Creature(player, id) = damaged else {
            return;
        };
        let event = TriggerEvent::new(Trigger::TakesDamage, player)
            .with_subject(id)
            .with_attacker(by);
        EffectInterpreter::check_triggered(store, &event, 0);
    }
}

fn attack_of(state: &GameState, target: Target) -> u32 {
    target
        .instance()
        .and_then(|id| state.creature(target.player(), id))
        .map_or(0, |c| c.attack_damage())
}
