//! EventHub Web
//!
//! Event discovery and registration front end built with Leptos (WASM).
//!
//! # Features
//!
//! - Browse and filter the event catalog
//! - Event details with registration
//! - Personal dashboard with cancellation
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Screen state lives in the `eventhub` view models; this crate
//! only wires them to signals, the DOM and `gloo-net`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
