//! Grocky Frontend App
//!
//! Root component: startup session lookup, the server event stream, and
//! routing to the group page.

use entity_sync::InvalidationBus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use reactive_stores::Store;

use crate::commands;
use crate::components::{CreateListModal, GroupPage};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::ListOwner;
use crate::route::{use_route, Route};
use crate::store::{store_finish_startup, AppState, AppStore};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store: AppStore = Store::new(AppState::default());
    provide_context(store);

    let bus = InvalidationBus::new();
    let create_list_request = signal::<Option<ListOwner>>(None);
    provide_context(AppContext::new(bus.clone(), config.clone(), create_list_request));

    // Readiness flips once the session lookup settles, signed in or not
    let session_config = config.clone();
    spawn_local(async move {
        let session = match commands::get_session(&session_config).await {
            Ok(session) => session,
            Err(e) => {
                warn!("session lookup failed: {}", e);
                None
            }
        };
        match &session {
            Some(s) => info!("signed in as {} ({})", s.username, s.user_id),
            None => info!("no active session"),
        }
        store_finish_startup(&store, session);
    });

    commands::start_event_stream(config.url("/events"), bus);

    let route = use_route();
    let on_group_page = Memo::new(move |_| route.get().is_group());
    let group_id = Signal::derive(move || route.get().group_id());

    view! {
        <main class="app-layout">
            <Show
                when=move || on_group_page.get()
                fallback=move || match route.get() {
                    Route::Home => view! { <p class="empty-route">"Pick a group to get started."</p> }.into_any(),
                    _ => view! { <p class="empty-route">"Page not found."</p> }.into_any(),
                }
            >
                <GroupPage group_id=group_id />
            </Show>
            <CreateListModal />
        </main>
    }
}
