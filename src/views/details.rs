//! Event details view
//!
//! Shows one event and runs the registration workflow:
//!
//! ```text
//! Idle ──begin──▶ Registering ──ok──▶ Succeeded ──(after REDIRECT_DELAY)──▶ /dashboard
//!   ▲                  │
//!   └──────err─────────┘   (error message kept, retry allowed)
//! ```
//!
//! Without a session, `begin` yields a redirect to `/login` and no request
//! is made.

use std::time::Duration;
use thiserror::Error;

use super::loadable::{LoadState, Loadable, Ticket};
use super::route::Route;
use crate::catalog::{Event, EventId};
use crate::service::{ClientResult, EventService};
use crate::session::Session;

/// How long the confirmation stays up before moving to the dashboard
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

pub const SUCCESS_MESSAGE: &str = "Successfully registered for the event!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationPhase {
    #[default]
    Idle,
    Registering,
    Succeeded,
}

/// Why a registration attempt was refused before reaching the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("A registration is already in progress")]
    InFlight,

    #[error("Already registered for this event")]
    AlreadyRegistered,

    #[error("Event details are not loaded")]
    NotLoaded,

    #[error("Event is sold out")]
    SoldOut,
}

/// Result of asking to register
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStep {
    /// Signed out; go here instead
    RedirectToLogin(Route),
    /// Send the registration request for this event
    Submit(EventId),
}

/// A delayed navigation requested by the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: Route,
    pub after: Duration,
}

impl Navigation {
    /// Delay in whole milliseconds for `u32` timer APIs, saturating
    pub fn after_millis(&self) -> u32 {
        u32::try_from(self.after.as_millis()).unwrap_or(u32::MAX)
    }
}

/// Outcome of the async registration driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    RedirectToLogin(Route),
    Registered(Navigation),
    /// The server refused; message is on the view
    Failed,
}

/// The registration control in its current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionControl {
    /// Signed out; leads to `/login`
    LoginRequired,
    /// Always disabled
    SoldOut,
    Register { enabled: bool },
}

impl ActionControl {
    pub fn label(&self) -> &'static str {
        match self {
            ActionControl::LoginRequired => "Login to Register",
            ActionControl::SoldOut => "Event Sold Out",
            ActionControl::Register { enabled: true } => "Register for Event",
            ActionControl::Register { enabled: false } => "Registering...",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            ActionControl::LoginRequired => true,
            ActionControl::SoldOut => false,
            ActionControl::Register { enabled } => *enabled,
        }
    }
}

/// State of the event details view
#[derive(Debug, Clone)]
pub struct EventDetailsView {
    id: EventId,
    event: Loadable<Event>,
    phase: RegistrationPhase,
    message: Option<String>,
    error: Option<String>,
}

impl EventDetailsView {
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            event: Loadable::new(),
            phase: RegistrationPhase::Idle,
            message: None,
            error: None,
        }
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.event.begin()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: ClientResult<Event>) {
        if let Err(err) = &result {
            tracing::warn!(event_id = %self.id, error = %err, "Failed to load event");
        }
        self.event.finish(ticket, result);
    }

    pub async fn load<S: EventService + ?Sized>(&mut self, service: &S) {
        let ticket = self.begin_load();
        let result = service.get_event(&self.id).await;
        self.finish_load(ticket, result);
    }

    /// Ask to register. Never contacts the server itself.
    pub fn begin_registration(
        &mut self,
        session: Option<&Session>,
    ) -> Result<RegistrationStep, RegistrationError> {
        if session.is_none() {
            return Ok(RegistrationStep::RedirectToLogin(Route::Login));
        }

        match self.phase {
            RegistrationPhase::Registering => return Err(RegistrationError::InFlight),
            RegistrationPhase::Succeeded => return Err(RegistrationError::AlreadyRegistered),
            RegistrationPhase::Idle => {}
        }

        let event = self.event.data().ok_or(RegistrationError::NotLoaded)?;
        if event.is_sold_out() {
            return Err(RegistrationError::SoldOut);
        }

        self.phase = RegistrationPhase::Registering;
        self.message = None;
        self.error = None;
        tracing::debug!(event_id = %self.id, "Registration started");

        Ok(RegistrationStep::Submit(self.id.clone()))
    }

    /// Apply the server's answer to a submitted registration
    pub fn complete_registration(&mut self, result: ClientResult<Event>) -> Option<Navigation> {
        if self.phase != RegistrationPhase::Registering {
            tracing::debug!(event_id = %self.id, "Ignoring registration result with nothing in flight");
            return None;
        }

        match result {
            Ok(event) => {
                // Seats come from the server copy, never a local decrement
                self.event.replace(event);
                self.phase = RegistrationPhase::Succeeded;
                self.message = Some(SUCCESS_MESSAGE.to_string());
                tracing::info!(event_id = %self.id, "Registered for event");

                Some(Navigation {
                    to: Route::Dashboard,
                    after: REDIRECT_DELAY,
                })
            }
            Err(err) => {
                tracing::warn!(event_id = %self.id, error = %err, "Registration failed");
                self.phase = RegistrationPhase::Idle;
                self.error = Some(err.user_message());
                None
            }
        }
    }

    /// Run a full registration attempt against `service`
    pub async fn register<S: EventService + ?Sized>(
        &mut self,
        service: &S,
        session: Option<&Session>,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        let id = match self.begin_registration(session)? {
            RegistrationStep::RedirectToLogin(route) => {
                return Ok(RegistrationOutcome::RedirectToLogin(route))
            }
            RegistrationStep::Submit(id) => id,
        };

        // begin_registration only submits with a session
        let Some(session) = session else {
            return Ok(RegistrationOutcome::RedirectToLogin(Route::Login));
        };

        let result = service.register(session, &id).await;
        Ok(match self.complete_registration(result) {
            Some(navigation) => RegistrationOutcome::Registered(navigation),
            None => RegistrationOutcome::Failed,
        })
    }

    pub fn state(&self) -> LoadState<'_, Event> {
        self.event.state()
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.data()
    }

    pub fn phase(&self) -> RegistrationPhase {
        self.phase
    }

    /// Confirmation banner text
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Inline error banner: registration failures, or a load error once an
    /// event is on screen
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().or_else(|| match self.event.data() {
            Some(_) => self.event.error(),
            None => None,
        })
    }

    /// The registration control for the current session
    pub fn action(&self, session: Option<&Session>) -> Option<ActionControl> {
        let event = self.event.data()?;

        Some(if session.is_none() {
            ActionControl::LoginRequired
        } else if event.is_sold_out() {
            ActionControl::SoldOut
        } else {
            ActionControl::Register {
                enabled: self.phase != RegistrationPhase::Registering,
            }
        })
    }

    /// Target of the back button
    pub fn back(&self) -> Route {
        Route::Events
    }
}
