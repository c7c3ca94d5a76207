//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Navbar, Toast};
use crate::pages::{Dashboard, EventDetails, Events, Home, SignIn};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="app">
                <Navbar />

                <main class="main-content">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/events" view=Events />
                        <Route path="/event/:id" view=EventDetails />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/login" view=|| view! { <SignIn sign_up=false /> } />
                        <Route path="/register" view=|| view! { <SignIn sign_up=true /> } />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <div class="not-found-icon">"🔍"</div>
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <A href="/events" class="btn btn-primary">"Browse Events"</A>
        </div>
    }
}
