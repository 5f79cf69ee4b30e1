//! # Change Notification
//!
//! A small observer registry shared by the cart and search stores.
//!
//! Listeners are called synchronously, in subscription order, with a
//! reference to the new state after every dispatched action.

use std::collections::BTreeMap;
use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Registry of listeners interested in a state of type `S`.
pub struct Subscribers<S> {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, Listener<S>>,
}

impl<S> Subscribers<S> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: BTreeMap::new(),
        }
    }

    /// Register a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Call every listener with `state`.
    pub fn notify(&self, state: &S) {
        for listener in self.listeners.values() {
            listener(state);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<S> Default for Subscribers<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Subscribers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn notify_reaches_every_listener() {
        let mut subs: Subscribers<u32> = Subscribers::new();
        let seen = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let seen = Arc::clone(&seen);
            subs.subscribe(move |value| {
                seen.fetch_add(*value as usize, Ordering::SeqCst);
            });
        }

        subs.notify(&2);
        assert_eq!(seen.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut subs: Subscribers<u32> = Subscribers::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let id = subs.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        subs.notify(&0);
        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
        subs.notify(&0);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(subs.is_empty());
    }
}
