//! Event detectors: discrete semantic events from raw per-tick state deltas

mod dash;
mod stealth;
mod turret;

pub use dash::{DashRecord, DashTracker, NewPathArgs};
pub use stealth::{StealthEvent, StealthTracker, STEALTHED};
pub use turret::{TurretAttack, TurretTracker};

/// Registered observers of one event type, notified in registration order.
///
/// Events already fired are never replayed to late subscribers.
pub struct Observers<E> {
    subscribers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Observers {
            subscribers: Vec::new(),
        }
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Observers::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&E) + 'static) {
        self.subscribers.push(Box::new(observer));
    }

    pub fn emit(&mut self, event: &E) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
