//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use eventhub::views::present;
use eventhub::views::{Notice, Route};
use eventhub::{Session, SessionContext};

const SESSION_KEY: &str = "eventhub_session";

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Signed-in user and token, mirrored to local storage
    pub session: RwSignal<SessionContext>,
    /// Alert shown in the toast, if any
    pub notice: RwSignal<Option<Notice>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(SessionContext::restored(load_session())),
        notice: create_rw_signal(None),
    };

    provide_context(state);
}

/// Global state from context
pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}

impl GlobalState {
    /// Current session, tracked
    pub fn current_session(&self) -> Option<Session> {
        self.session.with(|ctx| ctx.current().cloned())
    }

    /// Current session, without subscribing
    pub fn session_untracked(&self) -> Option<Session> {
        self.session.with_untracked(|ctx| ctx.current().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(SessionContext::is_authenticated)
    }

    pub fn login(&self, session: Session) {
        store_session(Some(&session));
        self.session.update(|ctx| ctx.login(session));
    }

    /// Sign out and return where to go next
    pub fn logout(&self) -> Route {
        store_session(None);
        self.session
            .try_update(present::logout)
            .unwrap_or(Route::Login)
    }

    /// Show an alert; it clears itself unless replaced first
    pub fn notify(&self, notice: Notice) {
        let millis = match notice {
            Notice::Success(_) => 3000,
            Notice::Failure(_) => 5000,
        };
        self.notice.set(Some(notice.clone()));

        let signal = self.notice;
        gloo_timers::callback::Timeout::new(millis, move || {
            if signal.with_untracked(|current| current.as_ref() == Some(&notice)) {
                signal.set(None);
            }
        })
        .forget();
    }

    pub fn show_success(&self, message: &str) {
        self.notify(Notice::Success(message.to_string()));
    }

    pub fn dismiss(&self) {
        self.notice.set(None);
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_session() -> Option<Session> {
    let raw = storage()?.get_item(SESSION_KEY).ok().flatten()?;

    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            web_sys::console::warn_1(&format!("Discarding stored session: {}", e).into());
            None
        }
    }
}

fn store_session(session: Option<&Session>) {
    let Some(storage) = storage() else {
        return;
    };

    let result = match session.map(serde_json::to_string) {
        Some(Ok(json)) => storage.set_item(SESSION_KEY, &json),
        Some(Err(e)) => {
            web_sys::console::error_1(&format!("Failed to encode session: {}", e).into());
            return;
        }
        None => storage.remove_item(SESSION_KEY),
    };

    if result.is_err() {
        web_sys::console::error_1(&"Failed to update stored session".into());
    }
}
