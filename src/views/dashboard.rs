//! Dashboard view
//!
//! The signed-in user's registrations and the cancellation workflow.
//! Cancelling needs explicit confirmation, marks only the affected row as
//! busy, and always ends with a full reload of the registration list.

use std::collections::BTreeSet;

use super::loadable::{LoadState, Loadable, Ticket};
use super::route::Route;
use crate::catalog::{EventId, RegisteredEvent, Registrations};
use crate::service::{ClientResult, EventService};
use crate::session::Session;

pub const CANCEL_PROMPT: &str = "Are you sure you want to cancel this registration?";

pub const CANCEL_SUCCESS: &str = "Registration cancelled successfully";

/// Result of asking to cancel a registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelStep {
    /// The user did not confirm; nothing was sent
    Declined,
    /// A cancellation for this event is already in flight
    Busy,
    Submit(EventId),
}

/// Alert shown after an action completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Failure(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub upcoming: usize,
    pub past: usize,
}

/// State of the dashboard
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    registrations: Loadable<Registrations>,
    cancelling: BTreeSet<EventId>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where to go instead when nobody is signed in
    pub fn guard(session: Option<&Session>) -> Option<Route> {
        match session {
            Some(_) => None,
            None => Some(Route::Login),
        }
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.registrations.begin()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: ClientResult<Registrations>) {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Failed to load registrations");
        }
        self.registrations.finish(ticket, result);
    }

    pub async fn load<S: EventService + ?Sized>(&mut self, service: &S, session: &Session) {
        let ticket = self.begin_load();
        let result = service.registrations(session).await;
        self.finish_load(ticket, result);
    }

    /// Ask to cancel; `confirm` is shown [`CANCEL_PROMPT`] and decides
    pub fn begin_cancel<F>(&mut self, id: &EventId, confirm: F) -> CancelStep
    where
        F: FnOnce(&str) -> bool,
    {
        if self.cancelling.contains(id) {
            return CancelStep::Busy;
        }
        if !confirm(CANCEL_PROMPT) {
            return CancelStep::Declined;
        }

        self.cancelling.insert(id.clone());
        tracing::debug!(event_id = %id, "Cancellation started");
        CancelStep::Submit(id.clone())
    }

    /// Release the row and turn the result into an alert.
    /// The caller reloads the registration list afterwards.
    pub fn finish_cancel(&mut self, id: &EventId, result: ClientResult<()>) -> Notice {
        self.cancelling.remove(id);

        match result {
            Ok(()) => {
                tracing::info!(event_id = %id, "Registration cancelled");
                Notice::Success(CANCEL_SUCCESS.to_string())
            }
            Err(err) => {
                tracing::warn!(event_id = %id, error = %err, "Cancellation failed");
                Notice::Failure(err.user_message())
            }
        }
    }

    /// Run a full cancellation: confirm, request, reload.
    /// Returns `None` when nothing was sent.
    pub async fn cancel<S, F>(
        &mut self,
        service: &S,
        session: &Session,
        id: &EventId,
        confirm: F,
    ) -> Option<Notice>
    where
        S: EventService + ?Sized,
        F: FnOnce(&str) -> bool,
    {
        let id = match self.begin_cancel(id, confirm) {
            CancelStep::Submit(id) => id,
            CancelStep::Declined | CancelStep::Busy => return None,
        };

        let result = service.cancel_registration(session, &id).await;
        let notice = self.finish_cancel(&id, result);

        // Reload rather than patch, success or not
        self.load(service, session).await;
        Some(notice)
    }

    pub fn state(&self) -> LoadState<'_, Registrations> {
        self.registrations.state()
    }

    pub fn registrations(&self) -> Option<&Registrations> {
        self.registrations.data()
    }

    /// Banner text, shown alongside whatever data is loaded
    pub fn error(&self) -> Option<&str> {
        self.registrations.error()
    }

    pub fn stats(&self) -> DashboardStats {
        self.registrations
            .data()
            .map(|r| DashboardStats {
                total: r.all.len(),
                upcoming: r.upcoming.len(),
                past: r.past.len(),
            })
            .unwrap_or_default()
    }

    /// No registrations at all
    pub fn is_empty(&self) -> bool {
        self.registrations.data().map_or(true, Registrations::is_empty)
    }

    /// Upcoming registrations; these carry a cancel control
    pub fn upcoming(&self) -> &[RegisteredEvent] {
        self.registrations
            .data()
            .map_or(&[][..], |r| r.upcoming.as_slice())
    }

    /// Past registrations; view only
    pub fn past(&self) -> &[RegisteredEvent] {
        self.registrations
            .data()
            .map_or(&[][..], |r| r.past.as_slice())
    }

    /// Whether this row's cancel control shows as busy
    pub fn is_cancelling(&self, id: &EventId) -> bool {
        self.cancelling.contains(id)
    }

    /// Label of a row's cancel control
    pub fn cancel_label(&self, id: &EventId) -> &'static str {
        if self.is_cancelling(id) {
            "Cancelling..."
        } else {
            "Cancel Registration"
        }
    }
}
