// crates/agenticops-core/src/store.rs
// Subscription registry shared by the state containers

use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Listeners notified with a read-only view after every mutation
pub struct Subscribers<S> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
}

impl<S> Default for Subscribers<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<S> fmt::Debug for Subscribers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.listeners.len())
            .finish()
    }
}

impl<S> Subscribers<S> {
    pub fn subscribe(&mut self, listener: impl Fn(&S) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was never registered or already removed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Listeners run in registration order
    pub fn notify(&self, state: &S) {
        for (_, listener) in &self.listeners {
            listener(state);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_all_listeners() {
        let mut subs: Subscribers<u32> = Subscribers::default();
        let total = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let total = total.clone();
            subs.subscribe(move |v| {
                total.fetch_add(*v as usize, Ordering::SeqCst);
            });
        }

        subs.notify(&2);
        assert_eq!(total.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut subs: Subscribers<u32> = Subscribers::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let id = subs.subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        subs.notify(&0);
        assert!(subs.unsubscribe(id));
        subs.notify(&0);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(subs.is_empty());
    }

    #[test]
    fn test_unsubscribe_twice_returns_false() {
        let mut subs: Subscribers<()> = Subscribers::default();
        let id = subs.subscribe(|_| {});
        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut subs: Subscribers<()> = Subscribers::default();
        let a = subs.subscribe(|_| {});
        subs.unsubscribe(a);
        let b = subs.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(subs.len(), 1);
    }
}
