//! View Models
//!
//! Front-end independent state of each screen. Front ends render from the
//! read accessors and feed user input and responses back through explicit
//! transitions; nothing here touches the network directly except the async
//! drivers, which only go through [`EventService`](crate::service::EventService).
//!
//! - [`EventsView`]: catalog browsing and filtering
//! - [`EventDetailsView`]: one event and the registration workflow
//! - [`DashboardView`]: the user's registrations and cancellation
//! - [`Route`]: client-side locations

pub mod dashboard;
pub mod details;
pub mod events;
pub mod loadable;
pub mod present;
pub mod route;

pub use dashboard::{
    CancelStep, DashboardStats, DashboardView, Notice, CANCEL_PROMPT, CANCEL_SUCCESS,
};
pub use details::{
    ActionControl, EventDetailsView, Navigation, RegistrationError, RegistrationOutcome,
    RegistrationPhase, RegistrationStep, REDIRECT_DELAY,
};
pub use events::{EventsAction, EventsView};
pub use loadable::{LoadState, Loadable, Ticket};
pub use present::{EventCardModel, NavItem, NavTarget};
pub use route::Route;
