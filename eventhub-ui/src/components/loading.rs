//! Loading Component

use leptos::*;

/// Full-width loading indicator with a message
#[component]
pub fn Loading(
    #[prop(into, default = "Loading...".into())]
    message: String,
) -> impl IntoView {
    view! {
        <div class="loading-container">
            <div class="loading-spinner" />
            <p>{message}</p>
        </div>
    }
}
