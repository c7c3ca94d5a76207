//! Toast Notification Component
//!
//! Shows the latest success or failure alert. Clicking it dismisses it.

use leptos::*;

use eventhub::views::Notice;

use crate::state::global::use_global_state;

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="toast-container">
            {move || {
                state.notice.get().map(|notice| {
                    let (icon, class, role) = match notice {
                        Notice::Success(_) => ("✓", "toast toast-success", "status"),
                        Notice::Failure(_) => ("✕", "toast toast-error", "alert"),
                    };

                    view! {
                        <div class=class role=role on:click=move |_| state.dismiss()>
                            <span class="toast-icon">{icon}</span>
                            <span class="toast-message">{notice.text().to_string()}</span>
                        </div>
                    }
                })
            }}
        </div>
    }
}
