//! Slot Notice Component
//!
//! Placeholder for a slot without a value: a spinner while loading, or the
//! failure reason, with a retry button when retrying can help.

use entity_sync::FetchError;
use leptos::prelude::*;

fn describe(error: &FetchError) -> String {
    match error {
        FetchError::NotFound(_) => "This group does not exist or was deleted.".to_string(),
        FetchError::Unauthorized => "You don't have access to this group.".to_string(),
        FetchError::Transport(_) => "Could not reach the server.".to_string(),
        other => format!("Something went wrong ({}).", other),
    }
}

#[component]
pub fn SlotNotice(
    #[prop(into)] error: Signal<Option<FetchError>>,
    #[prop(into)] on_retry: Callback<()>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    view! {
        <div class=format!("slot-notice {}", class)>
            {move || match error.get() {
                Some(e) => view! {
                    <div class="slot-error">
                        <span class="slot-error-text">{describe(&e)}</span>
                        {e.is_retryable().then(|| view! {
                            <button class="retry-btn" on:click=move |_| on_retry.run(())>
                                "Retry"
                            </button>
                        })}
                    </div>
                }.into_any(),
                None => view! { <div class="loader" aria-busy="true"></div> }.into_any(),
            }}
        </div>
    }
}
