//! Group Page Component
//!
//! A group's lists as a searchable grid of cards. Group record, lists and
//! members are three independent slots, each refreshed by its own topic.

use entity_sync::{project, SearchPattern};
use leptos::prelude::*;

use crate::commands::{GroupSource, HttpGroupSource, GROUP_CHANGED, GROUP_LISTS, GROUP_USERS};
use crate::components::{CreateListCard, ListCard, SearchHeader, SlotNotice};
use crate::context::AppContext;
use crate::models::{ListSummary, Member};
use crate::store::{session_guards, use_app_store};
use crate::sync::use_entity_slot;

#[component]
pub fn GroupPage(#[prop(into)] group_id: Signal<Option<String>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let guards = session_guards(use_app_store());
    let source = HttpGroupSource::new(ctx.config().api_base);

    let group = use_entity_slot(GROUP_CHANGED, group_id, guards, ctx.bus(), {
        let source = source.clone();
        move |id: String| {
            let source = source.clone();
            async move { source.get_group(&id).await }
        }
    });
    let lists = use_entity_slot(GROUP_LISTS, group_id, guards, ctx.bus(), {
        let source = source.clone();
        move |id: String| {
            let source = source.clone();
            async move { source.get_group_lists(&id).await }
        }
    });
    let members = use_entity_slot(GROUP_USERS, group_id, guards, ctx.bus(), move |id: String| {
        let source = source.clone();
        async move { source.get_group_members(&id).await }
    });

    let (search, set_search) = signal(String::new());
    let search_invalid = Signal::derive(move || SearchPattern::parse(&search.get()).is_invalid());

    // Sorted + filtered on every render, never stored
    let shown_lists = move || {
        let pattern = SearchPattern::parse(&search.get());
        let all = lists.value().unwrap_or_default();
        project(&all, &pattern)
            .into_iter()
            .cloned()
            .collect::<Vec<ListSummary>>()
    };

    let group_name = Signal::derive(move || group.value().map(|g| g.name).unwrap_or_default());
    let group_description =
        Signal::derive(move || group.value().and_then(|g| g.description).unwrap_or_default());
    let member_count = Signal::derive(move || members.value().map(|m| m.len()));
    let member_names = Signal::derive(move || {
        members
            .value()
            .map(|m| m.iter().map(Member::label).collect::<Vec<_>>().join(", "))
            .unwrap_or_default()
    });

    view! {
        <Show
            when=move || group.value().is_some() && group_id.get().is_some()
            fallback=move || view! {
                <SlotNotice
                    error=Signal::derive(move || group.error())
                    on_retry=Callback::new(move |_| group.retry())
                    class="group-loader"
                />
            }
        >
            <div class="group-page">
                <SearchHeader
                    title=group_name
                    description=group_description
                    search=search
                    set_search=set_search
                    invalid=search_invalid
                    member_count=member_count
                    member_names=member_names
                />

                <div class="group-list-panel">
                    <For
                        each=shown_lists
                        key=ListSummary::render_key
                        children=move |list| view! { <ListCard list=list /> }
                    />
                    <CreateListCard group_id=Signal::derive(move || group_id.get().unwrap_or_default()) />
                </div>

                <Show when=move || lists.error().is_some() || (lists.value().is_none() && lists.is_loading())>
                    <SlotNotice
                        error=Signal::derive(move || lists.error())
                        on_retry=Callback::new(move |_| lists.retry())
                        class="list-loader"
                    />
                </Show>
            </div>
        </Show>
    }
}
