//! Create List Modal Component
//!
//! Opened through `AppContext::create_list`. Submits and closes right away;
//! whoever owns the list hears about it through its invalidation topic.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::commands;
use crate::context::AppContext;
use crate::models::NewList;

#[component]
pub fn CreateListModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (name, set_name) = signal(String::new());

    let close = move || {
        set_name.set(String::new());
        ctx.close_create_list();
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(owner) = ctx.create_list_request.get_untracked() else {
            return;
        };
        let list_name = name.get_untracked().trim().to_string();
        if list_name.is_empty() {
            return;
        }

        let config = ctx.config();
        spawn_local(async move {
            let new_list = NewList { name: list_name, owner };
            match commands::create_list(&config, &new_list).await {
                Ok(created) => info!("created list {} ({})", created.name, created.id),
                Err(e) => warn!("could not create list {:?}: {}", new_list.name, e),
            }
        });
        close();
    };

    view! {
        <Show when=move || ctx.create_list_request.get().is_some()>
            <div class="modal-backdrop" on:click=move |_| close()>
                <form
                    class="modal create-list-modal"
                    on:click=|ev| ev.stop_propagation()
                    on:submit=on_submit
                >
                    <h3>"New list"</h3>
                    <input
                        type="text"
                        placeholder="List name"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <div class="modal-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button type="submit">"Create"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
