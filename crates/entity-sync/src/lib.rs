//! Entity Sync
//!
//! Keeps pieces of server-derived state fresh without tying them to a UI
//! framework. A slot is refetched when its binding (identity key + guards)
//! changes and when a matching invalidation topic is published.
//!
//! Nothing in here performs I/O: [`EntitySync`] hands out [`FetchTicket`]s
//! and the caller runs the fetch however its runtime spawns futures, then
//! reports back with [`EntitySync::resolve`].

mod bus;
mod error;
mod machine;
mod projection;
mod slot;
mod topic;

pub use bus::{InvalidationBus, Subscription};
pub use error::FetchError;
pub use machine::{EntitySync, FetchTicket, Guards, Resolution};
pub use projection::{compare_names, project, Named, SearchPattern};
pub use slot::SlotState;
pub use topic::{Topic, TopicTemplate, NULL_KEY_SENTINEL};
