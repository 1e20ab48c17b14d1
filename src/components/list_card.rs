//! List Card Components
//!
//! Cards in the group grid: one per list, plus the trailing create card.

use leptos::prelude::*;

use crate::commands::encode_segment;
use crate::context::AppContext;
use crate::models::{ListOwner, ListSummary};

/// Card linking to a single list
#[component]
pub fn ListCard(list: ListSummary) -> impl IntoView {
    let href = format!("/lists/{}", encode_segment(&list.id));
    let count = list.item_count.map(|n| match n {
        1 => "1 item".to_string(),
        n => format!("{} items", n),
    });

    view! {
        <a class="grocky-item list-card" href=href>
            <div class="list-card-name">{list.name}</div>
            {count.map(|c| view! { <div class="list-card-count">{c}</div> })}
        </a>
    }
}

/// Trailing card that opens the create-list modal for this group
#[component]
pub fn CreateListCard(#[prop(into)] group_id: Signal<String>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="grocky-item create create-list">
            <button
                class="creation-button list"
                on:click=move |_| ctx.create_list(ListOwner::group(group_id.get()))
            >
                <span class="button-icon">"☰"</span>
                <span class="button-title">"New list"</span>
            </button>
        </div>
    }
}
