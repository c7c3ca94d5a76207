//! Home Page
//!
//! Landing hero and feature overview.

use leptos::*;
use leptos_router::*;

use eventhub::Route;

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="home">
            <section class="hero-section">
                <h1 class="hero-title">"Welcome to Bellcorp Events"</h1>
                <p class="hero-subtitle">
                    "Discover and register for amazing events happening near you"
                </p>
                <div class="hero-buttons">
                    <A href=Route::Events.path() class="btn btn-primary">"Browse Events"</A>
                    <A href=Route::Register.path() class="btn btn-secondary">"Get Started"</A>
                </div>
            </section>

            <section class="features-section">
                <h2>"Why Choose Bellcorp Events?"</h2>
                <div class="features-grid">
                    <Feature
                        icon="🎯"
                        title="Easy Discovery"
                        text="Search and filter through hundreds of events to find exactly what you're looking for"
                    />
                    <Feature
                        icon="🎫"
                        title="Quick Registration"
                        text="Register for events with just a few clicks and manage all your bookings in one place"
                    />
                    <Feature
                        icon="📱"
                        title="Stay Updated"
                        text="Get real-time updates about your registered events and never miss out"
                    />
                </div>
            </section>
        </div>
    }
}

#[component]
fn Feature(icon: &'static str, title: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <div class="feature-card">
            <div class="feature-icon">{icon}</div>
            <h3>{title}</h3>
            <p>{text}</p>
        </div>
    }
}
