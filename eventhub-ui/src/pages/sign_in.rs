//! Sign In Page
//!
//! Tokens are issued by the events service; this page stores one for the
//! browser session.

use leptos::*;
use leptos_router::*;

use eventhub::{Route, Session, User};

use crate::state::global::use_global_state;

#[component]
pub fn SignIn(
    /// Reached through "Sign Up" rather than "Login"
    sign_up: bool,
) -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (token, set_token) = create_signal(String::new());
    let (user_id, set_user_id) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let name = name.get().trim().to_string();
        let token = token.get().trim().to_string();
        if name.is_empty() || token.is_empty() {
            set_error.set(Some("Name and token are required".to_string()));
            return;
        }

        let user = match user_id.get().trim() {
            "" => User::new(name),
            id => User::new(name).with_id(id),
        };
        state.login(Session::new(user, token));
        state.show_success("Signed in");
        navigate(&Route::Events.path(), Default::default());
    };

    let (title, subtitle) = if sign_up {
        ("Create Account", "Paste the access token issued to you by the events service")
    } else {
        ("Login", "Sign in with your name and access token")
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>{title}</h1>
                <p>{subtitle}</p>

                {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

                <label>"Name"</label>
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />

                <label>"Access token"</label>
                <input
                    type="password"
                    prop:value=move || token.get()
                    on:input=move |ev| set_token.set(event_target_value(&ev))
                />

                <label>"User ID (optional)"</label>
                <input
                    type="text"
                    prop:value=move || user_id.get()
                    on:input=move |ev| set_user_id.set(event_target_value(&ev))
                />

                <button type="submit" class="btn btn-primary">{title}</button>

                {if sign_up {
                    view! { <p>"Already have a token? " <A href=Route::Login.path()>"Login"</A></p> }
                } else {
                    view! { <p>"New here? " <A href=Route::Register.path()>"Sign Up"</A></p> }
                }}
            </form>
        </div>
    }
}
