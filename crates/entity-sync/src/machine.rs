//! Entity Synchronizer State Machine
//!
//! One `EntitySync` binds an identity key and a set of guards to a single
//! slot. Every fetch it asks for is described by a [`FetchTicket`] carrying
//! a generation number; only the ticket from the most recent cycle may
//! populate the slot.

use log::{debug, warn};

use crate::error::FetchError;
use crate::slot::SlotState;
use crate::topic::{Topic, TopicTemplate};

/// Prerequisites that must hold before anything is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Guards {
    /// The client finished its startup (session lookup etc.)
    pub ready: bool,
    /// An authenticated session is present
    pub session: bool,
}

impl Guards {
    pub const fn new(ready: bool, session: bool) -> Self {
        Self { ready, session }
    }

    pub fn satisfied(&self) -> bool {
        self.ready && self.session
    }
}

/// A fetch the caller must run and report back via [`EntitySync::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    key: String,
}

impl FetchTicket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of reporting a fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The ticket was superseded by a newer cycle, a key change or unmount
    Stale,
}

/// Synchronizer for one slot of server-derived state
#[derive(Debug, Clone)]
pub struct EntitySync<T> {
    template: TopicTemplate,
    key: Option<String>,
    guards: Guards,
    bound: bool,
    generation: u64,
    state: SlotState<T>,
    unmounted: bool,
}

impl<T> EntitySync<T> {
    pub fn new(template: TopicTemplate) -> Self {
        Self {
            template,
            key: None,
            guards: Guards::default(),
            bound: false,
            generation: 0,
            state: SlotState::Unloaded,
            unmounted: false,
        }
    }

    /// Re-bind after the key or any guard changed.
    ///
    /// Returns a ticket when a fetch should start. An absent key or a lost
    /// session clears the slot; a different key never keeps the old value.
    pub fn bind(&mut self, key: Option<String>, guards: Guards) -> Option<FetchTicket> {
        if self.unmounted {
            return None;
        }
        let key = key.filter(|k| !k.is_empty());
        let same_key = self.key == key;
        let unchanged = self.bound && same_key && self.guards == guards;

        self.bound = true;
        self.key = key;
        self.guards = guards;

        if self.key.is_none() || !guards.session {
            self.clear();
            return None;
        }
        if !same_key {
            self.clear();
        } else if unchanged && !matches!(self.state, SlotState::Unloaded) {
            return None;
        }
        self.start_cycle()
    }

    /// Handle a published topic; refetches only if it is the bound topic
    pub fn invalidate(&mut self, topic: &Topic) -> Option<FetchTicket> {
        if self.unmounted || *topic != self.topic() {
            return None;
        }
        debug!("invalidated by {}", topic);
        self.start_cycle()
    }

    /// Run the current cycle again, e.g. after a failure
    pub fn retry(&mut self) -> Option<FetchTicket> {
        self.start_cycle()
    }

    /// Report the outcome of a ticket's fetch
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<T, FetchError>) -> Resolution {
        let current = !self.unmounted
            && ticket.generation == self.generation
            && self.key.as_deref() == Some(ticket.key.as_str());
        if !current {
            debug!(
                "discarding stale result for {} (generation {} < {})",
                self.template.topic(Some(&ticket.key)),
                ticket.generation,
                self.generation
            );
            return Resolution::Stale;
        }

        self.state = match result {
            Ok(value) => SlotState::Loaded(value),
            Err(e) => {
                warn!("fetch for {} failed: {}", self.topic(), e);
                SlotState::Failed(e)
            }
        };
        Resolution::Applied
    }

    /// Terminal: drop the value and ignore everything afterwards
    pub fn unmount(&mut self) {
        self.unmounted = true;
        self.clear();
    }

    /// Topic this slot currently listens to
    pub fn topic(&self) -> Topic {
        self.template.topic(self.key.as_deref())
    }

    pub fn state(&self) -> &SlotState<T> {
        &self.state
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn clear(&mut self) {
        // Bumping the generation orphans any ticket still in flight.
        self.generation += 1;
        self.state = SlotState::Unloaded;
    }

    fn start_cycle(&mut self) -> Option<FetchTicket> {
        if self.unmounted || !self.guards.satisfied() {
            return None;
        }
        let key = self.key.clone()?;
        self.generation += 1;
        self.state.begin_refresh();
        debug!("fetching {} (generation {})", self.topic(), self.generation);
        Some(FetchTicket {
            generation: self.generation,
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUP: TopicTemplate = TopicTemplate::new("group", "changed");
    const READY: Guards = Guards::new(true, true);

    fn key(k: &str) -> Option<String> {
        Some(k.to_string())
    }

    #[test]
    fn test_bind_issues_ticket_when_guards_hold() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let ticket = sync.bind(key("g1"), READY).expect("ticket");
        assert_eq!(ticket.key(), "g1");
        assert!(sync.state().is_loading());

        assert_eq!(sync.resolve(ticket, Ok(7)), Resolution::Applied);
        assert_eq!(sync.state(), &SlotState::Loaded(7));
    }

    #[test]
    fn test_bind_waits_for_guards() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        assert!(sync.bind(key("g1"), Guards::new(false, true)).is_none());
        assert!(sync.bind(key("g1"), Guards::new(true, false)).is_none());
        assert_eq!(sync.state(), &SlotState::Unloaded);

        assert!(sync.bind(key("g1"), READY).is_some());
    }

    #[test]
    fn test_absent_key_clears_without_fetch() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let t = sync.bind(key("g1"), READY).unwrap();
        sync.resolve(t, Ok(1));

        assert!(sync.bind(None, READY).is_none());
        assert_eq!(sync.state(), &SlotState::Unloaded);
        assert_eq!(sync.topic().as_str(), "group.null.changed");

        assert!(sync.bind(Some(String::new()), READY).is_none());
        assert_eq!(sync.key(), None);
    }

    #[test]
    fn test_rebind_unchanged_is_noop() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let t = sync.bind(key("g1"), READY).unwrap();
        assert!(sync.bind(key("g1"), READY).is_none());
        sync.resolve(t, Ok(1));
        assert!(sync.bind(key("g1"), READY).is_none());
        assert_eq!(sync.state(), &SlotState::Loaded(1));
    }

    #[test]
    fn test_ready_toggle_refetches_same_key() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let t = sync.bind(key("g1"), READY).unwrap();
        sync.resolve(t, Ok(1));

        assert!(sync.bind(key("g1"), Guards::new(false, true)).is_none());
        assert_eq!(sync.state(), &SlotState::Loaded(1));

        let t = sync.bind(key("g1"), READY).expect("refetch");
        assert_eq!(sync.state(), &SlotState::Loading { stale: Some(1) });
        sync.resolve(t, Ok(2));
        assert_eq!(sync.state(), &SlotState::Loaded(2));
    }

    #[test]
    fn test_session_loss_clears_value() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let t = sync.bind(key("g1"), READY).unwrap();
        sync.resolve(t, Ok(1));

        assert!(sync.bind(key("g1"), Guards::new(true, false)).is_none());
        assert_eq!(sync.state(), &SlotState::Unloaded);
    }

    #[test]
    fn test_key_change_drops_old_value() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let t = sync.bind(key("g1"), READY).unwrap();
        sync.resolve(t, Ok(1));

        let t2 = sync.bind(key("g2"), READY).unwrap();
        assert_eq!(sync.state(), &SlotState::Loading { stale: None });
        assert_eq!(t2.key(), "g2");
    }

    #[test]
    fn test_stale_ticket_from_old_key_is_discarded() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let old = sync.bind(key("g1"), READY).unwrap();
        let new = sync.bind(key("g2"), READY).unwrap();

        assert_eq!(sync.resolve(old, Ok(1)), Resolution::Stale);
        assert!(sync.state().is_loading());
        assert_eq!(sync.resolve(new, Ok(2)), Resolution::Applied);
        assert_eq!(sync.state(), &SlotState::Loaded(2));
    }

    #[test]
    fn test_overlapping_cycles_latest_wins() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let first = sync.bind(key("g1"), READY).unwrap();
        let second = sync.invalidate(&"group.g1.changed".into()).unwrap();

        // Newer cycle resolves first; the older one arriving late must not overwrite it.
        assert_eq!(sync.resolve(second, Ok(2)), Resolution::Applied);
        assert_eq!(sync.resolve(first, Ok(1)), Resolution::Stale);
        assert_eq!(sync.state(), &SlotState::Loaded(2));
    }

    #[test]
    fn test_invalidate_ignores_other_topics() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let t = sync.bind(key("g1"), READY).unwrap();
        sync.resolve(t, Ok(1));

        assert!(sync.invalidate(&"group.g2.changed".into()).is_none());
        assert!(sync.invalidate(&"group.g1.lists".into()).is_none());
        assert!(sync.invalidate(&"group.g1.changed".into()).is_some());
    }

    #[test]
    fn test_invalidate_on_sentinel_topic_does_nothing() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        sync.bind(None, READY);
        assert!(sync.invalidate(&"group.null.changed".into()).is_none());
    }

    #[test]
    fn test_failure_then_retry() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let t = sync.bind(key("g1"), READY).unwrap();
        sync.resolve(t, Err(FetchError::Transport("offline".into())));
        assert!(sync.state().error().is_some());

        // A spurious re-bind does not retry on its own.
        assert!(sync.bind(key("g1"), READY).is_none());

        let t = sync.retry().expect("retry ticket");
        assert_eq!(sync.state(), &SlotState::Loading { stale: None });
        sync.resolve(t, Ok(5));
        assert_eq!(sync.state(), &SlotState::Loaded(5));
    }

    #[test]
    fn test_unmount_is_terminal() {
        let mut sync = EntitySync::<u32>::new(GROUP);
        let t = sync.bind(key("g1"), READY).unwrap();
        sync.unmount();

        assert_eq!(sync.resolve(t, Ok(1)), Resolution::Stale);
        assert!(sync.bind(key("g2"), READY).is_none());
        assert!(sync.retry().is_none());
        assert!(sync.invalidate(&"group.g1.changed".into()).is_none());
        assert_eq!(sync.state(), &SlotState::Unloaded);
    }
}
