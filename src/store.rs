//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use entity_sync::Guards;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Session;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Startup finished (the first session lookup settled)
    pub ready: bool,
    /// Signed-in user, if any
    pub session: Option<Session>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Readiness and session presence, as the guards every synchronized slot
/// waits on
pub fn session_guards(store: AppStore) -> Signal<Guards> {
    Signal::derive(move || {
        Guards::new(
            store.ready().get(),
            store.session().with(|s| s.is_some()),
        )
    })
}

/// Record the outcome of the startup session lookup
pub fn store_finish_startup(store: &AppStore, session: Option<Session>) {
    *store.session().write() = session;
    *store.ready().write() = true;
}
