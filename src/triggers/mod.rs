//! Events and triggered abilities.
//!
//! Two separate streams leave the rules engine:
//!
//! - [`GameEvent`]: observation-only notifications published on the
//!   [`EventBus`] for UI, AI, persistence or achievement listeners. No rule
//!   reads them.
//! - [`TriggerEvent`]: engine-internal occurrences (turn start, damage
//!   taken, card drawn, ...) that the effect interpreter matches against
//!   [`TriggeredAbility`]s on the boards.
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use stonefire_engine::core::PlayerId;
//! use stonefire_engine::triggers::{EventBus, EventKind, GameEvent};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut bus = EventBus::new();
//!
//! let log = Rc::clone(&seen);
//! bus.on(EventKind::TurnStarted, move |event| log.borrow_mut().push(event.name()));
//!
//! bus.emit(&GameEvent::TurnStarted { player: PlayerId::Player, turn: 1 });
//! bus.emit(&GameEvent::TurnEnded { player: PlayerId::Player });
//!
//! assert_eq!(*seen.borrow(), vec!["TURN_STARTED"]);
//! ```

mod ability;
mod bus;
mod event;

pub use ability::{Trigger, TriggerEvent, TriggerPlayer, TriggeredAbility};
pub use bus::{EventBus, SubscriptionId};
pub use event::{EventKind, GameEvent};
