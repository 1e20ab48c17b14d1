//! Invalidation Bus
//!
//! In-process fan-out of topic signals to subscribers. Whatever receives
//! server push messages publishes them here; every synchronized slot holds a
//! [`Subscription`] for its current topic.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use log::trace;
use parking_lot::Mutex;

use crate::topic::Topic;

type Callback = Arc<dyn Fn(&Topic) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    topics: HashMap<Topic, Vec<(u64, Callback)>>,
}

/// Cheap-to-clone handle to a shared topic registry
#[derive(Clone, Default)]
pub struct InvalidationBus {
    inner: Arc<Mutex<Registry>>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for exactly `topic`; dropping the returned
    /// subscription unregisters it
    pub fn subscribe<F>(&self, topic: Topic, callback: F) -> Subscription
    where
        F: Fn(&Topic) + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock();
        registry.next_id += 1;
        let id = registry.next_id;
        let callback: Callback = Arc::new(callback);
        registry
            .topics
            .entry(topic.clone())
            .or_default()
            .push((id, callback));
        trace!("subscribed #{} to {}", id, topic);
        Subscription {
            registry: Arc::downgrade(&self.inner),
            topic,
            id,
        }
    }

    /// Signal every subscriber of `topic`. Returns how many callbacks ran.
    pub fn publish(&self, topic: &Topic) -> usize {
        // Snapshot first so callbacks can (un)subscribe without deadlocking.
        let callbacks: Vec<Callback> = match self.inner.lock().topics.get(topic) {
            Some(subs) => subs.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            None => Vec::new(),
        };
        trace!("publishing {} to {} subscriber(s)", topic, callbacks.len());
        for cb in &callbacks {
            cb(topic);
        }
        callbacks.len()
    }

    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.inner.lock().topics.get(topic).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for InvalidationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.lock();
        f.debug_struct("InvalidationBus")
            .field("topics", &registry.topics.len())
            .finish()
    }
}

/// Live registration on an [`InvalidationBus`]
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    topic: Topic,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // The callback may own other subscriptions; drop it after unlocking.
        let _removed = {
            let mut registry = registry.lock();
            let mut removed = None;
            if let Some(subs) = registry.topics.get_mut(&self.topic) {
                if let Some(pos) = subs.iter().position(|(id, _)| *id == self.id) {
                    removed = Some(subs.remove(pos));
                }
                if subs.is_empty() {
                    registry.topics.remove(&self.topic);
                }
            }
            removed
        };
        trace!("unsubscribed #{} from {}", self.id, self.topic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&Topic) + Send + Sync + 'static) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        (hits, move |_: &Topic| {
            h.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_publish_reaches_only_matching_topic() {
        let bus = InvalidationBus::new();
        let (lists_hits, on_lists) = counter();
        let (users_hits, on_users) = counter();
        let _a = bus.subscribe("group.g1.lists".into(), on_lists);
        let _b = bus.subscribe("group.g1.users".into(), on_users);

        assert_eq!(bus.publish(&"group.g1.lists".into()), 1);
        assert_eq!(lists_hits.load(Ordering::SeqCst), 1);
        assert_eq!(users_hits.load(Ordering::SeqCst), 0);
        assert_eq!(bus.publish(&"group.g2.lists".into()), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = InvalidationBus::new();
        let (hits, cb) = counter();
        let topic: Topic = "group.g1.changed".into();
        let sub = bus.subscribe(topic.clone(), cb);
        assert_eq!(bus.subscriber_count(&topic), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(&topic), 0);
        assert_eq!(bus.publish(&topic), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_outliving_bus() {
        let bus = InvalidationBus::new();
        let (_, cb) = counter();
        let sub = bus.subscribe("group.g1.changed".into(), cb);
        drop(bus);
        drop(sub);
    }

    #[test]
    fn test_reentrant_subscribe_from_callback() {
        let bus = InvalidationBus::new();
        let held = Arc::new(Mutex::new(Vec::new()));
        let topic: Topic = "group.g1.lists".into();

        let (b, h, t) = (bus.clone(), Arc::clone(&held), topic.clone());
        let _sub = bus.subscribe(topic.clone(), move |_| {
            let (_, cb) = counter();
            h.lock().push(b.subscribe(t.clone(), cb));
        });

        assert_eq!(bus.publish(&topic), 1);
        assert_eq!(bus.subscriber_count(&topic), 2);
    }
}
