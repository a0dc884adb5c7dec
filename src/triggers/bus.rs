//! Synchronous event bus.
//!
//! Listeners are called in subscription order, once per emitted event,
//! before `emit` returns. Listeners receive `&GameEvent` only; they have no
//! path back into the `Store`, so a notification can never re-enter a
//! dispatch that is still running.

use super::event::{EventKind, GameEvent};

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

struct Subscription {
    id: SubscriptionId,
    /// `None` listens to every event.
    kind: Option<EventKind>,
    listener: Listener,
}

/// Publish/subscribe channel for `GameEvent`s.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl EventBus {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to one kind of event.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.subscribe(Some(kind), Box::new(listener))
    }

    /// Listen to every event.
    pub fn on_any(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.subscribe(None, Box::new(listener))
    }

    fn subscribe(&mut self, kind: Option<EventKind>, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, listener });
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Notify every matching listener, in subscription order.
    pub fn emit(&mut self, event: &GameEvent) {
        let kind = event.kind();
        log::trace!("event {}", kind);
        for subscription in &mut self.subscriptions {
            if subscription.kind.map_or(true, |k| k == kind) {
                (subscription.listener)(event);
            }
        }
    }

    /// Number of active listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}
