//! # EventHub
//!
//! Event discovery and registration client - browse a remote catalog,
//! filter it locally, register for events and manage registrations.
//!
//! ## Features
//!
//! - **Local filtering**: search, category and location narrowing over the
//!   loaded catalog, recomputed on every input change
//! - **Registration workflow**: guarded against double submission, with the
//!   server's seat count as the source of truth
//! - **Cancellation workflow**: confirmation first, per-row busy state, full
//!   reload afterwards
//! - **Two front ends**: the `eventhub` CLI and a Leptos web app share the
//!   same view models
//!
//! ## Modules
//!
//! - [`catalog`]: Event records and the Filter Engine
//! - [`session`]: Signed-in identity and bearer token
//! - [`service`]: The events API seam and its HTTP client
//! - [`views`]: Front-end independent screen state
//! - [`config`]: TOML and environment configuration (native only)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventhub::service::{HttpConfig, HttpEventService};
//! use eventhub::views::{EventsAction, EventsView};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = HttpEventService::new(HttpConfig::default())?;
//!
//!     let mut view = EventsView::new();
//!     view.load(&service).await;
//!     view.dispatch(EventsAction::SetSearch("jazz".to_string()));
//!
//!     println!("{}", view.summary());
//!     for event in view.visible() {
//!         println!("{} - {}", event.name, event.location);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
#[cfg(feature = "native")]
pub mod config;
pub mod service;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use catalog::{filter_events, Event, EventId, FilterCriteria, RegisteredEvent, Registrations, User};

pub use service::{ClientError, ClientResult, EventService};

pub use session::{Session, SessionContext};

#[cfg(feature = "native")]
pub use service::{HttpConfig, HttpEventService};

#[cfg(feature = "native")]
pub use session::{SessionError, SessionStore};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};

pub use views::{DashboardView, EventDetailsView, EventsView, LoadState, Notice, Route};
