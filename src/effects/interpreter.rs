//! The effect interpreter.
//!
//! Effects never touch the state directly. Each step resolves its selector
//! against the live snapshot, makes any random choice up front, and then
//! dispatches concrete actions to the `Store`. Trigger occurrences returned
//! by those dispatches are matched against the triggered abilities on both
//! boards before the next step runs.
//!
//! Recursion is bounded by `RulesConfig::max_trigger_depth`: an effect or
//! trigger nested deeper than that is dropped with a warning.

use super::condition::Condition;
use super::deaths;
use super::effect::{DrawTarget, Effect, Selector};
use super::targeting::{self, Targets};
use crate::cards::CardInstance;
use crate::core::{Action, CreatureChanges, InstanceId, PlayerId, Store, Target};
use crate::error::ActionError;
use crate::triggers::{GameEvent, TriggerEvent};

/// Who is applying an effect and what it can refer to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectContext {
    /// Friendly side for `all_friendly`, `self_hero`, draws, summons.
    pub source_player: PlayerId,

    /// The creature the effect belongs to (`self`).
    pub source: Option<InstanceId>,

    /// Target chosen when the card was played.
    pub target: Option<Target>,

    /// Damage source for `TakesDamage` abilities.
    pub attacker: Option<Target>,

    /// Trigger nesting depth.
    pub depth: u32,

    /// A death sweep is already running further up; `multiple` leaves the
    /// dead for it instead of starting its own.
    pub sweeping: bool,
}

impl EffectContext {
    #[must_use]
    pub fn new(source_player: PlayerId) -> Self {
        Self {
            source_player,
            source: None,
            target: None,
            attacker: None,
            depth: 0,
            sweeping: false,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: InstanceId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_optional_target(mut self, target: Option<Target>) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_attacker(mut self, attacker: Target) -> Self {
        self.attacker = Some(attacker);
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn sweeping(mut self) -> Self {
        self.sweeping = true;
        self
    }
}

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Effect resolved successfully.
    Success,
    /// Effect failed (e.g., trigger depth exceeded).
    Failed(String),
    /// Nothing to do (no targets, condition not met).
    Skipped,
}

impl ResolveResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Executes effects and triggered abilities against a `Store`.
pub struct EffectInterpreter;

impl EffectInterpreter {
    /// Apply `effect` in `ctx`.
    ///
    /// Once the game is over the remaining steps are dropped and the result
    /// is `Success`: everything that could still happen, happened.
    pub fn apply(store: &mut Store, effect: &Effect, ctx: &EffectContext) -> ResolveResult {
        let limit = store.config().max_trigger_depth;
        if ctx.depth > limit {
            log::warn!("{} effect dropped at trigger depth {}", effect.name(), ctx.depth);
            return ResolveResult::Failed(ActionError::TriggerDepthExceeded(limit).to_string());
        }
        if store.state().game_over {
            return ResolveResult::Skipped;
        }

        log::trace!("apply {} for {} at depth {}", effect.name(), ctx.source_player, ctx.depth);
        match Self::run(store, effect, ctx) {
            Ok(result) => result,
            Err(ActionError::GameOver) => {
                log::debug!("{} effect cut short by game over", effect.name());
                ResolveResult::Success
            }
            Err(e) => {
                log::debug!("{} effect failed: {}", effect.name(), e);
                ResolveResult::Failed(e.to_string())
            }
        }
    }

    fn run(store: &mut Store, effect: &Effect, ctx: &EffectContext) -> Result<ResolveResult, ActionError> {
        let me = ctx.source_player;

        match effect {
            Effect::Damage { target, amount } => {
                let targets = Self::targets(store, *target, ctx);
                if targets.is_empty() {
                    return Ok(ResolveResult::Skipped);
                }
                for t in targets {
                    Self::dispatch(store, Action::DealDamage { target: t, amount: *amount }, ctx)?;
                }
                store.emit(GameEvent::EffectDamage { source_player: me, amount: *amount });
            }

            Effect::Heal { target, amount } => {
                let targets = Self::targets(store, *target, ctx);
                if targets.is_empty() {
                    return Ok(ResolveResult::Skipped);
                }
                for t in targets {
                    Self::dispatch(store, Action::Heal { target: t, amount: *amount }, ctx)?;
                }
                store.emit(GameEvent::EffectHeal { source_player: me, amount: *amount });
            }

            Effect::Buff { target, attack, health } => {
                let changed = Self::modify_each(store, *target, ctx, |c| {
                    CreatureChanges::new()
                        .with_attack(c.current_attack.saturating_add(*attack))
                        .with_health(c.current_health.saturating_add(*health))
                        .with_max_health(c.max_health.saturating_add(*health))
                })?;
                if !changed {
                    return Ok(ResolveResult::Skipped);
                }
                store.emit(GameEvent::EffectBuff { source_player: me, attack: *attack, health: *health });
            }

            Effect::Debuff { target, attack, health } => {
                let changed = Self::modify_each(store, *target, ctx, |c| {
                    CreatureChanges::new()
                        .with_attack(c.current_attack.saturating_sub(*attack).max(0))
                        .with_health(c.current_health.saturating_sub(*health))
                })?;
                if !changed {
                    return Ok(ResolveResult::Skipped);
                }
                store.emit(GameEvent::EffectDebuff { source_player: me, attack: *attack, health: *health });
            }

            Effect::Draw { amount, target } => {
                let player = match target {
                    DrawTarget::Owner => me,
                    DrawTarget::Opponent => me.opponent(),
                };
                for _ in 0..*amount {
                    Self::dispatch(store, Action::DrawCard { player }, ctx)?;
                }
                store.emit(GameEvent::EffectDraw { player, amount: *amount });
            }

            Effect::Destroy { target } => {
                let changed = Self::modify_each(store, *target, ctx, |_| CreatureChanges::new().marked_for_death())?;
                if !changed {
                    return Ok(ResolveResult::Skipped);
                }
                store.emit(GameEvent::EffectDestroy { source_player: me });
            }

            Effect::Summon { creature, count } => {
                // Summon triggers can fill the board mid-loop.
                let mut summoned = 0;
                for _ in 0..*count {
                    if store.state().player(me).board.len() >= store.config().max_board_size {
                        break;
                    }
                    let card = creature.to_definition();
                    Self::dispatch(store, Action::SummonCreature { player: me, card }, ctx)?;
                    summoned += 1;
                }
                if summoned < *count {
                    log::trace!("board full: summoned {} of {} {}", summoned, count, creature.name);
                }
                if summoned == 0 {
                    return Ok(ResolveResult::Skipped);
                }
            }

            Effect::Mana { gain, crystal } => {
                if *gain > 0 {
                    let current = store.state().player(me).mana.saturating_add(*gain);
                    Self::dispatch(store, Action::ModifyMana { player: me, current: Some(current), max: None }, ctx)?;
                }
                if *crystal > 0 {
                    let max = store.state().player(me).max_mana.saturating_add(*crystal);
                    Self::dispatch(store, Action::ModifyMana { player: me, current: None, max: Some(max) }, ctx)?;
                }
                store.emit(GameEvent::EffectMana { player: me, gain: *gain, crystal: *crystal });
            }

            Effect::Transform { target, into } => {
                let changed = Self::modify_each(store, *target, ctx, |c| {
                    CreatureChanges::new()
                        .with_card(c.transformed_card(into))
                        .with_attack(into.attack)
                        .with_health(into.health)
                        .with_max_health(into.health)
                        .with_has_attacked(true)
                        .with_summoning_sick(true)
                })?;
                if !changed {
                    return Ok(ResolveResult::Skipped);
                }
                store.emit(GameEvent::EffectTransform { source_player: me, into: into.name.clone() });
            }

            Effect::Silence { target } => {
                let changed =
                    Self::modify_each(store, *target, ctx, |c| CreatureChanges::new().with_card(c.silenced_card()))?;
                if !changed {
                    return Ok(ResolveResult::Skipped);
                }
                store.emit(GameEvent::EffectSilence { source_player: me });
            }

            Effect::Conditional { condition, then, otherwise } => {
                return Ok(Self::conditional(store, condition, then, otherwise.as_deref(), ctx));
            }

            Effect::Multiple(effects) => {
                for step in effects {
                    if let failed @ ResolveResult::Failed(_) = Self::apply(store, step, ctx) {
                        return Ok(failed);
                    }
                    if !ctx.sweeping {
                        deaths::resolve_deaths(store, ctx.depth);
                    }
                    if store.state().game_over {
                        break;
                    }
                }
            }
        }

        Ok(ResolveResult::Success)
    }

    fn conditional(
        store: &mut Store,
        condition: &Condition,
        then: &Effect,
        otherwise: Option<&Effect>,
        ctx: &EffectContext,
    ) -> ResolveResult {
        if condition.evaluate(store.state(), ctx.source_player) {
            Self::apply(store, then, ctx)
        } else if let Some(otherwise) = otherwise {
            Self::apply(store, otherwise, ctx)
        } else {
            ResolveResult::Skipped
        }
    }

    fn targets(store: &mut Store, selector: Selector, ctx: &EffectContext) -> Targets {
        let (state, rng) = store.state_and_rng();
        targeting::resolve(selector, state, ctx, rng)
    }

    /// Dispatch a `ModifyCreature` for every creature the selector picks.
    /// Heroes are skipped. Returns whether anything was changed.
    fn modify_each(
        store: &mut Store,
        selector: Selector,
        ctx: &EffectContext,
        make: impl Fn(&CardInstance) -> CreatureChanges,
    ) -> Result<bool, ActionError> {
        let mut changed = false;
        for target in Self::targets(store, selector, ctx) {
            let Target::Creature(player, instance_id) = target else {
                continue;
            };
            let Some(creature) = store.state().creature(player, instance_id) else {
                continue;
            };
            let changes = make(creature);
            Self::dispatch(store, Action::ModifyCreature { player, instance_id, changes }, ctx)?;
            changed = true;
        }
        Ok(changed)
    }

    /// Dispatch a top-level action and fire the triggers it produced.
    pub fn run_action(store: &mut Store, action: Action) -> Result<usize, ActionError> {
        let triggers = store.dispatch(action)?;
        Ok(triggers.iter().map(|event| Self::fire(store, event, 0, false)).sum())
    }

    /// Dispatch an action and fire the triggers it produced, one level
    /// deeper than `ctx`.
    pub(crate) fn dispatch(store: &mut Store, action: Action, ctx: &EffectContext) -> Result<(), ActionError> {
        let triggers = store.dispatch(action)?;
        for event in &triggers {
            Self::fire(store, event, ctx.depth + 1, ctx.sweeping);
        }
        Ok(())
    }

    /// Fire every triggered ability on either board that responds to
    /// `event`. Returns the number of abilities that fired.
    ///
    /// Abilities are collected up front, `Player` board first, board order.
    /// One whose creature has left the board by the time its turn comes is
    /// skipped.
    pub fn check_triggered(store: &mut Store, event: &TriggerEvent, depth: u32) -> usize {
        Self::fire(store, event, depth, false)
    }

    fn fire(store: &mut Store, event: &TriggerEvent, depth: u32, sweeping: bool) -> usize {
        let limit = store.config().max_trigger_depth;
        if depth > limit {
            log::warn!("{:?} trigger dropped at depth {}", event.trigger, depth);
            return 0;
        }

        let mut matched: Vec<(PlayerId, InstanceId, Effect)> = Vec::new();
        for (controller, side) in store.state().players.iter() {
            for creature in &side.board {
                for ability in &creature.card.abilities {
                    if ability.matches(event, controller, creature.instance_id) {
                        matched.push((controller, creature.instance_id, ability.effect.clone()));
                    }
                }
            }
        }

        let mut fired = 0;
        for (controller, source, effect) in matched {
            if store.state().game_over {
                break;
            }
            if store.state().creature(controller, source).is_none() {
                log::trace!("{} left the board before its {:?} ability", source, event.trigger);
                continue;
            }
            log::debug!("{} ability on {} fires ({})", source, controller, effect.name());

            let mut ctx = EffectContext::new(controller).with_source(source).with_depth(depth);
            ctx.attacker = event.attacker;
            ctx.sweeping = sweeping;
            Self::apply(store, &effect, &ctx);
            fired += 1;
        }
        fired
    }

    /// Evolve every creature whose evolve condition holds. Each creature
    /// evolves at most once. Returns how many evolved.
    pub fn check_evolve(store: &mut Store) -> usize {
        let candidates: Vec<(PlayerId, InstanceId)> = store
            .state()
            .players
            .iter()
            .flat_map(|(player, side)| {
                side.board
                    .iter()
                    .filter(|c| c.card.evolve.is_some())
                    .map(move |c| (player, c.instance_id))
            })
            .collect();

        let mut evolved = 0;
        for (player, instance_id) in candidates {
            let state = store.state();
            let Some(creature) = state.creature(player, instance_id) else {
                continue;
            };
            let Some(spec) = &creature.card.evolve else {
                continue;
            };
            if !spec.condition.evaluate(state, player) {
                continue;
            }

            let form = &spec.into;
            let mut card = creature.card.clone();
            card.name = form.name.clone();
            card.attack = form.attack;
            card.health = form.health;
            if !form.keywords.is_empty() {
                card.keywords = form.keywords.clone();
            }
            if !form.text.is_empty() {
                card.text = form.text.clone();
            }
            card.evolve = None;

            let changes = CreatureChanges::new()
                .with_attack(form.attack)
                .with_health(creature.current_health.saturating_add(form.health).saturating_sub(creature.max_health))
                .with_max_health(form.health)
                .with_card(card);
            let name = form.name.clone();

            let ctx = EffectContext::new(player);
            if Self::dispatch(store, Action::ModifyCreature { player, instance_id, changes }, &ctx).is_err() {
                break;
            }
            log::debug!("{} evolves into {}", instance_id, name);
            store.emit(GameEvent::CreatureEvolved { player, instance_id, name });
            evolved += 1;
        }
        evolved
    }
}
