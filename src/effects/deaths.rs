//! The death sweep.
//!
//! Each pass collects every dead creature (nonpositive health or marked for
//! death), `Player` board first, board order. For each one its extinct
//! effect runs while it is still on the board, then it moves to the
//! graveyard. Extinct effects can kill more creatures, so passes repeat
//! until one finds nothing, up to `RulesConfig::max_death_passes`.
//!
//! If the bound is reached, whatever is still dead is removed without its
//! extinct effect. Either way no dead creature is left on a board.

use super::interpreter::{EffectContext, EffectInterpreter};
use crate::core::{Action, InstanceId, PlayerId, Store};

/// What a sweep did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeathReport {
    /// Passes that found at least one death.
    pub passes: u32,

    /// Creatures removed normally, in removal order.
    pub died: Vec<(PlayerId, InstanceId)>,

    /// Creatures removed by the pass bound, without extinct effects.
    pub forced: Vec<(PlayerId, InstanceId)>,
}

impl DeathReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.died.is_empty() && self.forced.is_empty()
    }

    /// Total creatures removed.
    #[must_use]
    pub fn count(&self) -> usize {
        self.died.len() + self.forced.len()
    }
}

/// Sweep the boards until no dead creature remains or the game ends.
pub fn resolve_deaths(store: &mut Store, depth: u32) -> DeathReport {
    let mut report = DeathReport::default();
    let limit = store.config().max_death_passes;

    while report.passes < limit {
        if store.state().game_over {
            return report;
        }
        let dead = store.state().dead_creatures();
        if dead.is_empty() {
            return report;
        }
        report.passes += 1;
        log::trace!("death pass {}: {} dead", report.passes, dead.len());

        for (player, id) in dead {
            let extinct = match store.state().creature(player, id) {
                Some(c) if c.is_dead() => c.card.extinct.clone(),
                _ => continue,
            };

            if let Some(effect) = extinct {
                log::debug!("{} extinct effect ({})", id, effect.name());
                let ctx = EffectContext::new(player).with_source(id).with_depth(depth).sweeping();
                EffectInterpreter::apply(store, &effect, &ctx);
            }

            if store.dispatch(Action::DestroyCreature { player, instance_id: id }).is_err() {
                return report;
            }
            report.died.push((player, id));
        }
    }

    if store.state().game_over {
        return report;
    }
    let stuck = store.state().dead_creatures();
    if !stuck.is_empty() {
        log::error!(
            "death sweep hit {} passes; removing {} creatures without extinct effects",
            limit,
            stuck.len()
        );
    }
    for (player, id) in stuck {
        if store.dispatch(Action::DestroyCreature { player, instance_id: id }).is_err() {
            break;
        }
        report.forced.push((player, id));
    }
    report
}
