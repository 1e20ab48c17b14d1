//! Search Header Component
//!
//! Group title and description, member count, list search input.

use leptos::prelude::*;

#[component]
pub fn SearchHeader(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] description: Signal<String>,
    search: ReadSignal<String>,
    set_search: WriteSignal<String>,
    /// Search text is not a valid pattern (nothing will match)
    #[prop(into)] invalid: Signal<bool>,
    #[prop(into)] member_count: Signal<Option<usize>>,
    #[prop(into)] member_names: Signal<String>,
) -> impl IntoView {
    let members_label = move || match member_count.get() {
        Some(1) => "1 member".to_string(),
        Some(n) => format!("{} members", n),
        None => String::new(),
    };

    view! {
        <div class="search-header">
            <div class="search-header-title">
                <h2>{move || title.get()}</h2>
                <span class="member-count" title=move || member_names.get()>{members_label}</span>
            </div>
            <div class="search-header-description">
                <Show when=move || !description.get().is_empty()>
                    <p>{move || description.get()}</p>
                </Show>
            </div>
            <div class="search-header-row">
                <input
                    type="search"
                    class="search-input"
                    class:invalid=move || invalid.get()
                    placeholder="Search lists..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button class="icon-button" title="Group settings">"⚙"</button>
            </div>
            <hr class="divider" />
        </div>
    }
}
