//! Reactive Entity Slots
//!
//! Binds an `EntitySync` to Leptos: effects re-bind it when the key or guards
//! change, a bus subscription follows its current topic, and fetches run on
//! `spawn_local`.

use std::future::Future;
use std::sync::Arc;

use entity_sync::{
    EntitySync, FetchError, FetchTicket, Guards, InvalidationBus, Subscription, Topic, TopicTemplate,
};
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::prelude::*;
use leptos::task::spawn_local;

// The closure is shared with reactive handles, which must be Send + Sync; the
// futures it returns only ever run on the local executor.
type FetchFn<T> = Arc<dyn Fn(String) -> LocalBoxFuture<'static, Result<T, FetchError>> + Send + Sync>;

/// Handle to one synchronized slot
pub struct EntitySlot<T: Send + Sync + 'static> {
    machine: RwSignal<EntitySync<T>>,
    fetch: StoredValue<FetchFn<T>>,
}

impl<T: Send + Sync + 'static> Clone for EntitySlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for EntitySlot<T> {}

impl<T: Clone + Send + Sync + 'static> EntitySlot<T> {
    /// Current (possibly refreshing) value
    pub fn value(&self) -> Option<T> {
        self.machine.with(|m| m.state().value().cloned())
    }

    pub fn error(&self) -> Option<FetchError> {
        self.machine.with(|m| m.state().error().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.machine.with(|m| m.state().is_loading())
    }

    pub fn retry(&self) {
        if let Some(ticket) = self.machine.try_update(|m| m.retry()).flatten() {
            self.run(ticket);
        }
    }

    fn invalidate(&self, topic: &Topic) {
        if let Some(ticket) = self.machine.try_update(|m| m.invalidate(topic)).flatten() {
            self.run(ticket);
        }
    }

    fn run(&self, ticket: FetchTicket) {
        let Some(fetch) = self.fetch.try_get_value() else {
            return;
        };
        let machine = self.machine;
        spawn_local(async move {
            let result = fetch(ticket.key().to_string()).await;
            // The page may be gone by now; a disposed slot just drops the result.
            machine.try_update(|m| m.resolve(ticket, result));
        });
    }
}

/// Create a slot that fetches with `fetch` whenever `key`/`guards` change or
/// its topic is published on `bus`
pub fn use_entity_slot<T, F, Fut>(
    template: TopicTemplate,
    key: Signal<Option<String>>,
    guards: Signal<Guards>,
    bus: InvalidationBus,
    fetch: F,
) -> EntitySlot<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    let fetch: FetchFn<T> = Arc::new(move |key| fetch(key).boxed_local());
    let slot = EntitySlot {
        machine: RwSignal::new(EntitySync::new(template)),
        fetch: StoredValue::new(fetch),
    };

    Effect::new(move |_| {
        let key = key.get();
        let guards = guards.get();
        if let Some(ticket) = slot.machine.try_update(|m| m.bind(key, guards)).flatten() {
            slot.run(ticket);
        }
    });

    // Bus callbacks must be Send + Sync, so they only record the topic and
    // the effect below does the refetch.
    let machine = slot.machine;
    let signalled = RwSignal::new(None::<Topic>);
    let topic = Memo::new(move |_| machine.with(|m| m.topic()));
    let subscription = StoredValue::new(None::<Subscription>);
    Effect::new(move |_| {
        let sub = bus.subscribe(topic.get(), move |t| {
            let _ = signalled.try_set(Some(t.clone()));
        });
        subscription.update_value(|s| *s = Some(sub));
    });
    // Publishes landing before this runs coalesce into one refetch; the
    // latest ticket wins either way.
    Effect::new(move |_| {
        if let Some(topic) = signalled.get() {
            slot.invalidate(&topic);
        }
    });

    on_cleanup(move || {
        machine.try_update(|m| m.unmount());
        subscription.try_update_value(|s| s.take());
    });

    slot
}
