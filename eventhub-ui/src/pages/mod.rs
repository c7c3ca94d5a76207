//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod event_details;
pub mod events;
pub mod home;
pub mod sign_in;

pub use dashboard::Dashboard;
pub use event_details::EventDetails;
pub use events::Events;
pub use home::Home;
pub use sign_in::SignIn;
