//! HTTP API Client
//!
//! `EventService` over `gloo-net`, the browser counterpart of the CLI's
//! reqwest client.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;

use eventhub::service::{
    ClientError, ClientResult, Endpoint, EventService, Method, RegisterResponse,
};
use eventhub::{Event, EventId, Registrations, Session};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const API_URL_KEY: &str = "eventhub_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Client for the configured API base
pub fn service() -> GlooEventService {
    GlooEventService::new(get_api_base())
}

/// Events API client for the browser
#[derive(Debug, Clone)]
pub struct GlooEventService {
    base_url: String,
}

impl GlooEventService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn request(&self, endpoint: &Endpoint, session: Option<&Session>) -> RequestBuilder {
        let url = endpoint.url(&self.base_url);
        let builder = match endpoint.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url).header("Content-Type", "application/json"),
            Method::Delete => Request::delete(&url),
        };

        match session {
            Some(session) => builder.header("Authorization", &session.bearer()),
            None => builder,
        }
    }

    async fn execute(&self, endpoint: Endpoint, session: Option<&Session>) -> ClientResult<String> {
        if endpoint.operation.requires_auth() && session.is_none() {
            return Err(ClientError::Unauthenticated);
        }

        let response = self
            .request(&endpoint, session)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let body = response.text().await.unwrap_or_default();
        if !response.ok() {
            let err = endpoint.operation.failure(response.status(), &body);
            web_sys::console::warn_1(&format!("{}: {}", endpoint.path, err).into());
            return Err(err);
        }

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
impl EventService for GlooEventService {
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
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_default_api_base() {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(API_URL_KEY);
        }
        assert_eq!(get_api_base(), DEFAULT_API_BASE);
    }

    #[wasm_bindgen_test]
    async fn test_auth_required_without_session() {
        let service = GlooEventService::new(DEFAULT_API_BASE);
        let result = service
            .execute(Endpoint::registrations(), None)
            .await;
        assert_eq!(result, Err(ClientError::Unauthenticated));
    }
}
