//! Navigation Component
//!
//! Header bar; its entries follow the session.

use leptos::*;
use leptos_router::*;

use eventhub::views::present::nav_items;
use eventhub::views::{NavItem, NavTarget};

use crate::state::global::use_global_state;
use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Navbar() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let items = move || state.session.with(nav_items);

    view! {
        <nav class="navbar">
            <div class="navbar-container">
                <A href="/" class="navbar-logo">"Bellcorp Events"</A>

                <div class="navbar-links">
                    {move || {
                        let navigate = navigate.clone();
                        items()
                            .into_iter()
                            .map(|item| nav_entry(item, state, navigate.clone()))
                            .collect_view()
                    }}
                </div>
            </div>
        </nav>
    }
}

fn nav_entry<N>(item: NavItem, state: GlobalState, navigate: N) -> View
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    match item.target {
        NavTarget::Route(route) => view! {
            <A href=route.path() class="navbar-link" active_class="active">
                {item.label}
            </A>
        }
        .into_view(),
        NavTarget::Greeting => view! { <span class="navbar-user">{item.label}</span> }.into_view(),
        NavTarget::Logout => {
            let on_logout = move |_| {
                let route = state.logout();
                navigate(&route.path(), Default::default());
            };

            view! {
                <button on:click=on_logout class="navbar-btn logout-btn">
                    {item.label}
                </button>
            }
            .into_view()
        }
    }
}
