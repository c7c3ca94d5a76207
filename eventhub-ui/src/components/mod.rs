//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod event_card;
pub mod loading;
pub mod navbar;
pub mod toast;

pub use event_card::EventCard;
pub use loading::Loading;
pub use navbar::Navbar;
pub use toast::Toast;
