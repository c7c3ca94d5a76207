//! Event catalog
//!
//! Records received from the events API and the filter over them.

mod filter;
mod types;

pub use filter::{filter_events, FilterCriteria};
pub use types::{Event, EventId, RegisteredEvent, Registrations, User};
