//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use entity_sync::InvalidationBus;
use leptos::prelude::*;

use crate::config::AppConfig;
use crate::models::ListOwner;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    bus: StoredValue<InvalidationBus>,
    config: StoredValue<AppConfig>,
    /// Owner of the list being created, while the create-list modal is open - read
    pub create_list_request: ReadSignal<Option<ListOwner>>,
    /// Owner of the list being created - write
    set_create_list_request: WriteSignal<Option<ListOwner>>,
}

impl AppContext {
    pub fn new(
        bus: InvalidationBus,
        config: AppConfig,
        create_list_request: (ReadSignal<Option<ListOwner>>, WriteSignal<Option<ListOwner>>),
    ) -> Self {
        Self {
            bus: StoredValue::new(bus),
            config: StoredValue::new(config),
            create_list_request: create_list_request.0,
            set_create_list_request: create_list_request.1,
        }
    }

    pub fn bus(&self) -> InvalidationBus {
        self.bus.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Open the create-list modal for `owner`. Fire and forget: the new list
    /// shows up through the owner's invalidation topic.
    pub fn create_list(&self, owner: ListOwner) {
        self.set_create_list_request.set(Some(owner));
    }

    pub fn close_create_list(&self) {
        self.set_create_list_request.set(None);
    }
}
