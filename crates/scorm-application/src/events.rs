//! Synchronous lifecycle event broadcast.

use scorm_core::LifecycleEvent;
use std::panic::{self, AssertUnwindSafe};

/// A lifecycle event observer.
pub type Subscriber = Box<dyn Fn(&LifecycleEvent) -> anyhow::Result<()> + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Delivers events to subscribers in the order they subscribed.
///
/// A subscriber that fails or panics is logged and skipped; the remaining
/// subscribers still receive the event.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&LifecycleEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Broadcasts `event` and returns how many subscribers failed.
    pub fn publish(&self, event: &LifecycleEvent) -> usize {
        let mut failures = 0;
        for (id, subscriber) in &self.subscribers {
            match panic::catch_unwind(AssertUnwindSafe(|| subscriber(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failures += 1;
                    tracing::warn!(
                        "[EventBus] Subscriber {:?} failed on {:?}: {:#}",
                        id,
                        event,
                        e
                    );
                }
                Err(payload) => {
                    failures += 1;
                    tracing::warn!(
                        "[EventBus] Subscriber {:?} panicked on {:?}: {}",
                        id,
                        event,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        failures
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(
        log: &Arc<Mutex<Vec<String>>>,
        name: &'static str,
    ) -> impl Fn(&LifecycleEvent) -> anyhow::Result<()> + Send + Sync + 'static {
        let log = log.clone();
        move |event| {
            log.lock().unwrap().push(format!("{name}:{event:?}"));
            Ok(())
        }
    }

    #[test]
    fn delivers_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(recorder(&log, "a"));
        bus.subscribe(recorder(&log, "b"));

        assert_eq!(bus.publish(&LifecycleEvent::Commit), 0);
        assert_eq!(*log.lock().unwrap(), vec!["a:Commit", "b:Commit"]);
    }

    #[test]
    fn failing_and_panicking_subscribers_are_isolated() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(|_| anyhow::bail!("observer offline"));
        bus.subscribe(|_| panic!("observer exploded"));
        bus.subscribe(recorder(&log, "last"));

        assert_eq!(bus.publish(&LifecycleEvent::Initialized), 2);
        assert_eq!(*log.lock().unwrap(), vec!["last:Initialized"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_subscriber() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let a = bus.subscribe(recorder(&log, "a"));
        bus.subscribe(recorder(&log, "b"));

        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));
        bus.publish(&LifecycleEvent::Commit);

        assert_eq!(bus.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["b:Commit"]);
    }
}
