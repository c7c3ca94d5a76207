//! HTTP Events API Client
//!
//! `EventService` over `reqwest`, used by the CLI.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{
    ClientError, ClientResult, Endpoint, EventService, Method, RegisterResponse,
};
use crate::catalog::{Event, EventId, Registrations};
use crate::session::Session;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the events API (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Events API client
pub struct HttpEventService {
    client: Client,
    config: HttpConfig,
}

impl HttpEventService {
    /// Create a new client with the given configuration
    pub fn new(config: HttpConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn request(&self, endpoint: &Endpoint, session: Option<&Session>) -> RequestBuilder {
        let url = endpoint.url(&self.config.base_url);
        let builder = match endpoint.method {
            Method::Get => self.client.get(&url),
            Method::Post => self
                .client
                .post(&url)
                .header(CONTENT_TYPE, "application/json"),
            Method::Delete => self.client.delete(&url),
        };

        match session {
            Some(session) => builder.header(AUTHORIZATION, session.bearer()),
            None => builder,
        }
    }

    /// Send a request and return the body of a successful response
    async fn execute(&self, endpoint: Endpoint, session: Option<&Session>) -> ClientResult<String> {
        if endpoint.operation.requires_auth() && session.is_none() {
            return Err(ClientError::Unauthenticated);
        }

        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(
            request_id = %request_id,
            operation = ?endpoint.operation,
            path = %endpoint.path,
            "Sending request"
        );

        let response = self
            .request(&endpoint, session)
            .header("X-Request-Id", &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "Request failed");
                ClientError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = endpoint.operation.failure(status.as_u16(), &body);
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %err,
                "API returned an error"
            );
            return Err(err);
        }

        tracing::debug!(request_id = %request_id, status = status.as_u16(), "Request complete");
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let body = self.execute(endpoint, session).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait(?Send)]
impl EventService for HttpEventService {
    async fn list_events(&self) -> ClientResult<Vec<Event>> {
        let events: Vec<Event> = self.fetch(Endpoint::events(), None).await?;
        Ok(events.into_iter().map(Event::normalize).collect())
    }

    async fn list_categories(&self) -> ClientResult<Vec<String>> {
        self.fetch(Endpoint::categories(), None).await
    }

    async fn get_event(&self, id: &EventId) -> ClientResult<Event> {
        let event: Event = self.fetch(Endpoint::event(id), None).await?;
        Ok(event.normalize())
    }

    async fn register(&self, session: &Session, id: &EventId) -> ClientResult<Event> {
        let response: RegisterResponse = self.fetch(Endpoint::register(id), Some(session)).await?;
        Ok(response.event.normalize())
    }

    async fn cancel_registration(&self, session: &Session, id: &EventId) -> ClientResult<()> {
        // Success bodies carry only an informational message
        self.execute(Endpoint::cancel_registration(id), Some(session))
            .await
            .map(|_| ())
    }

    async fn registrations(&self, session: &Session) -> ClientResult<Registrations> {
        let registrations: Registrations =
            self.fetch(Endpoint::registrations(), Some(session)).await?;
        Ok(registrations.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::User;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    const TOKEN: &str = "good-token";

    fn event_json(id: &str, seats: u32) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Jazz Night",
            "category": "Music",
            "organizer": "Blue Note",
            "location": "Downtown Hall",
            "date": "2030-03-15T19:00:00Z",
            "description": "Live music",
            "capacity": 100,
            "available_seats": seats
        })
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {}", TOKEN))
    }

    async fn list_events() -> Json<serde_json::Value> {
        Json(json!([event_json("1", 10), event_json("2", 500)]))
    }

    async fn categories() -> Json<serde_json::Value> {
        Json(json!(["Music", "Tech"]))
    }

    async fn get_event(Path(id): Path<String>) -> Response {
        if id == "missing" {
            return (StatusCode::NOT_FOUND, Json(json!({"message": "Event not found"})))
                .into_response();
        }
        Json(event_json(&id, 42)).into_response()
    }

    async fn register(Path(id): Path<String>, headers: HeaderMap) -> Response {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
        }
        if id == "full" {
            return (StatusCode::BAD_REQUEST, Json(json!({"message": "Event is full"})))
                .into_response();
        }
        Json(json!({ "event": event_json(&id, 41) })).into_response()
    }

    async fn cancel(Path(id): Path<String>, headers: HeaderMap) -> Response {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        if id == "broken" {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        Json(json!({"message": "Registration cancelled"})).into_response()
    }

    async fn registrations(headers: HeaderMap) -> Response {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid token"})))
                .into_response();
        }
        let mut registered = event_json("1", 10);
        registered["registered_at"] = json!("2025-01-01T10:00:00Z");
        Json(json!({
            "all": [registered.clone()],
            "upcoming": [registered],
            "past": []
        }))
        .into_response()
    }

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route("/api/events", get(list_events))
            .route("/api/events/categories/all", get(categories))
            .route("/api/events/:id", get(get_event))
            .route("/api/events/:id/register", axum::routing::post(register).delete(cancel))
            .route("/api/user/registrations", get(registrations));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    async fn client() -> HttpEventService {
        let base_url = spawn_stub().await;
        HttpEventService::new(HttpConfig {
            base_url,
            request_timeout_ms: 5000,
        })
        .unwrap()
    }

    fn session(token: &str) -> Session {
        Session::new(User::new("Ada"), token)
    }

    #[tokio::test]
    async fn test_list_events_and_categories() {
        let client = client().await;

        let events = client.list_events().await.unwrap();
        assert_eq!(events.len(), 2);
        // Clamped to capacity on the way in
        assert_eq!(events[1].available_seats, 100);

        let categories = client.list_categories().await.unwrap();
        assert_eq!(categories, vec!["Music", "Tech"]);
    }

    #[tokio::test]
    async fn test_get_event_not_found_uses_server_message() {
        let client = client().await;

        let event = client.get_event(&EventId::from("9")).await.unwrap();
        assert_eq!(event.id.as_str(), "9");

        let err = client.get_event(&EventId::from("missing")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "Event not found");
    }

    #[tokio::test]
    async fn test_register_sends_bearer_token() {
        let client = client().await;
        let id = EventId::from("1");

        let event = client.register(&session(TOKEN), &id).await.unwrap();
        assert_eq!(event.available_seats, 41);

        let err = client.register(&session("wrong"), &id).await.unwrap_err();
        assert_eq!(err, ClientError::Unauthenticated);

        let err = client
            .register(&session(TOKEN), &EventId::from("full"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Event is full");
    }

    #[tokio::test]
    async fn test_cancel_registration() {
        let client = client().await;

        client
            .cancel_registration(&session(TOKEN), &EventId::from("1"))
            .await
            .unwrap();

        let err = client
            .cancel_registration(&session(TOKEN), &EventId::from("broken"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Failed to cancel registration");
    }

    #[tokio::test]
    async fn test_registrations() {
        let client = client().await;

        let regs = client.registrations(&session(TOKEN)).await.unwrap();
        assert_eq!(regs.all.len(), 1);
        assert_eq!(regs.upcoming.len(), 1);
        assert!(regs.past.is_empty());

        let err = client.registrations(&session("expired")).await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid token");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpEventService::new(HttpConfig {
            base_url: format!("http://{}", addr),
            request_timeout_ms: 2000,
        })
        .unwrap();

        let err = client.list_events().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_) | ClientError::Timeout));
    }
}
