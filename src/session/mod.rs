//! Session Context
//!
//! Holds the signed-in user and bearer token. The context is passed
//! explicitly to the views and calls that need it; it changes only through
//! `login` and `logout`.

#[cfg(feature = "native")]
mod store;

#[cfg(feature = "native")]
pub use store::{SessionError, SessionStore};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::User;

/// An authenticated identity and its bearer token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    token: String,
}

impl Session {
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// The current session, if any
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    /// A signed-out context
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously stored session
    pub fn restored(session: Option<Session>) -> Self {
        Self { current: session }
    }

    /// Replace any existing session
    pub fn login(&mut self, session: Session) {
        tracing::info!(user = %session.user.name, "Signed in");
        self.current = Some(session);
    }

    /// Tear down the session, returning it
    pub fn logout(&mut self) -> Option<Session> {
        let previous = self.current.take();
        if let Some(session) = &previous {
            tracing::info!(user = %session.user.name, "Signed out");
        }
        previous
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.is_authenticated());

        ctx.login(Session::new(User::new("Ada"), "tok-1"));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.user().map(|u| u.name.as_str()), Some("Ada"));
        assert_eq!(ctx.current().unwrap().bearer(), "Bearer tok-1");

        let previous = ctx.logout();
        assert!(previous.is_some());
        assert!(ctx.current().is_none());
        assert!(ctx.logout().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new(User::new("Ada"), "super-secret");
        let debug = format!("{:?}", session);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("Ada"));
    }
}
