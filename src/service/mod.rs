//! Events API
//!
//! The seam between views and the remote catalog/registration service.
//!
//! ## Architecture
//!
//! - **EventService**: one async method per endpoint, implemented over
//!   `reqwest` for the CLI ([`HttpEventService`]) and over `gloo-net` in the
//!   browser front end
//! - **Endpoint**: method + path of each call
//! - **Operation**: names a call and carries the text shown when the server
//!   fails without a message
//!
//! Futures are `?Send`: the client runs on a single cooperative thread.

mod error;
#[cfg(feature = "native")]
mod http;

pub use error::{ClientError, ClientResult};
#[cfg(feature = "native")]
pub use http::{HttpConfig, HttpEventService};

use async_trait::async_trait;
use serde::Deserialize;

use crate::catalog::{Event, EventId, Registrations};
use crate::session::Session;

/// Remote event catalog and registration service
#[async_trait(?Send)]
pub trait EventService {
    /// `GET /api/events`
    async fn list_events(&self) -> ClientResult<Vec<Event>>;

    /// `GET /api/events/categories/all`
    async fn list_categories(&self) -> ClientResult<Vec<String>>;

    /// `GET /api/events/{id}`
    async fn get_event(&self, id: &EventId) -> ClientResult<Event>;

    /// `POST /api/events/{id}/register`, returning the updated event
    async fn register(&self, session: &Session, id: &EventId) -> ClientResult<Event>;

    /// `DELETE /api/events/{id}/register`
    async fn cancel_registration(&self, session: &Session, id: &EventId) -> ClientResult<()>;

    /// `GET /api/user/registrations`
    async fn registrations(&self, session: &Session) -> ClientResult<Registrations>;
}

/// A call against the events API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchEvents,
    FetchCategories,
    FetchEvent,
    Register,
    CancelRegistration,
    FetchRegistrations,
}

impl Operation {
    /// Message used when a failed response carries none
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::FetchEvents => "Failed to fetch events",
            Operation::FetchCategories => "Failed to fetch categories",
            Operation::FetchEvent => "Failed to fetch event details",
            Operation::Register => "Registration failed",
            Operation::CancelRegistration => "Failed to cancel registration",
            Operation::FetchRegistrations => "Failed to fetch registrations",
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(
            self,
            Operation::Register | Operation::CancelRegistration | Operation::FetchRegistrations
        )
    }

    /// Build the error for a non-success status from the raw response body
    pub fn failure(self, status: u16, body: &str) -> ClientError {
        let message = serde_json::from_str::<ApiMessage>(body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.is_empty());

        match message {
            Some(message) => ClientError::Api { status, message },
            None if status == 401 => ClientError::Unauthenticated,
            None => ClientError::Api {
                status,
                message: self.fallback_message().to_string(),
            },
        }
    }
}

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Method and path of an API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub operation: Operation,
}

impl Endpoint {
    pub fn events() -> Self {
        Self::get("/api/events".to_string(), Operation::FetchEvents)
    }

    pub fn categories() -> Self {
        Self::get("/api/events/categories/all".to_string(), Operation::FetchCategories)
    }

    pub fn event(id: &EventId) -> Self {
        Self::get(
            format!("/api/events/{}", urlencoding::encode(id.as_str())),
            Operation::FetchEvent,
        )
    }

    pub fn register(id: &EventId) -> Self {
        Self {
            method: Method::Post,
            path: Self::registration_path(id),
            operation: Operation::Register,
        }
    }

    pub fn cancel_registration(id: &EventId) -> Self {
        Self {
            method: Method::Delete,
            path: Self::registration_path(id),
            operation: Operation::CancelRegistration,
        }
    }

    pub fn registrations() -> Self {
        Self::get(
            "/api/user/registrations".to_string(),
            Operation::FetchRegistrations,
        )
    }

    /// Absolute URL under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }

    fn get(path: String, operation: Operation) -> Self {
        Self {
            method: Method::Get,
            path,
            operation,
        }
    }

    fn registration_path(id: &EventId) -> String {
        format!("/api/events/{}/register", urlencoding::encode(id.as_str()))
    }
}

/// Error body returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Success body of `POST /api/events/{id}/register`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub event: Event,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        let id = EventId::from("abc");

        assert_eq!(Endpoint::events().path, "/api/events");
        assert_eq!(Endpoint::categories().path, "/api/events/categories/all");
        assert_eq!(Endpoint::event(&id).path, "/api/events/abc");
        assert_eq!(Endpoint::register(&id).method, Method::Post);
        assert_eq!(Endpoint::cancel_registration(&id).method, Method::Delete);
        assert_eq!(
            Endpoint::cancel_registration(&id).path,
            "/api/events/abc/register"
        );
        assert_eq!(Endpoint::registrations().path, "/api/user/registrations");
    }

    #[test]
    fn test_endpoint_encodes_id_and_joins_base() {
        let endpoint = Endpoint::event(&EventId::from("a b/c"));
        assert_eq!(endpoint.path, "/api/events/a%20b%2Fc");
        assert_eq!(
            endpoint.url("http://localhost:5000/"),
            "http://localhost:5000/api/events/a%20b%2Fc"
        );
    }

    #[test]
    fn test_failure_prefers_server_message() {
        let err = Operation::Register.failure(400, r#"{"message":"Event is full"}"#);
        assert_eq!(
            err,
            ClientError::Api {
                status: 400,
                message: "Event is full".to_string()
            }
        );
    }

    #[test]
    fn test_failure_falls_back_per_operation() {
        let err = Operation::Register.failure(500, "");
        assert_eq!(err.user_message(), "Registration failed");

        let err = Operation::FetchEvents.failure(502, "<html>bad gateway</html>");
        assert_eq!(err.user_message(), "Failed to fetch events");

        let err = Operation::CancelRegistration.failure(404, r#"{"message":""}"#);
        assert_eq!(err.user_message(), "Failed to cancel registration");
    }

    #[test]
    fn test_unauthorized_without_message() {
        let err = Operation::FetchRegistrations.failure(401, "{}");
        assert_eq!(err, ClientError::Unauthenticated);

        let err = Operation::FetchRegistrations.failure(401, r#"{"message":"Token expired"}"#);
        assert_eq!(err.user_message(), "Token expired");
    }

    #[test]
    fn test_auth_requirements() {
        assert!(!Operation::FetchEvents.requires_auth());
        assert!(!Operation::FetchEvent.requires_auth());
        assert!(Operation::Register.requires_auth());
        assert!(Operation::FetchRegistrations.requires_auth());
    }
}
