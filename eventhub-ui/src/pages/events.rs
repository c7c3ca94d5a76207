//! Events Page
//!
//! Catalog browsing with search, category and location filters.

use leptos::*;

use eventhub::views::{EventsAction, EventsView, LoadState};
use eventhub::{Event, EventService};

use crate::api;
use crate::components::{EventCard, Loading};

/// Events page component
#[component]
pub fn Events() -> impl IntoView {
    let page = create_rw_signal(EventsView::new());

    // Catalog and categories load independently on mount
    create_effect(move |_| {
        spawn_local(async move {
            let Some(ticket) = page.try_update(EventsView::begin_load) else {
                return;
            };
            let result = api::service().list_events().await;
            // Signal is gone once the page unmounts; the result is dropped
            page.try_update(|p| p.finish_load(ticket, result));
        });

        spawn_local(async move {
            let result = api::service().list_categories().await;
            page.try_update(|p| p.finish_categories(result));
        });
    });

    let dispatch = move |action: EventsAction| page.update(|p| p.dispatch(action));

    view! {
        <div class="events-page">
            <div class="events-header">
                <h1>"Discover Events"</h1>
                <p>"Browse through our collection of amazing events"</p>
            </div>

            <div class="filters-section">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search events..."
                    prop:value=move || page.with(|p| p.criteria().search.clone())
                    on:input=move |ev| dispatch(EventsAction::SetSearch(event_target_value(&ev)))
                />

                <select
                    class="filter-select"
                    prop:value=move || page.with(|p| p.criteria().category.clone())
                    on:change=move |ev| dispatch(EventsAction::SetCategory(event_target_value(&ev)))
                >
                    <option value="">"All Categories"</option>
                    {move || {
                        page.with(|p| p.categories().to_vec())
                            .into_iter()
                            .map(|category| view! {
                                <option value=category.clone()>{category.clone()}</option>
                            })
                            .collect_view()
                    }}
                </select>

                <input
                    type="text"
                    class="filter-input"
                    placeholder="Location..."
                    prop:value=move || page.with(|p| p.criteria().location.clone())
                    on:input=move |ev| dispatch(EventsAction::SetLocation(event_target_value(&ev)))
                />

                <Show when=move || page.with(EventsView::has_active_filters)>
                    <button
                        class="clear-filters-btn"
                        on:click=move |_| dispatch(EventsAction::ClearFilters)
                    >
                        "Clear Filters"
                    </button>
                </Show>
            </div>

            {move || page.with(render_catalog)}
        </div>
    }
}

fn render_catalog(page: &EventsView) -> View {
    match page.state() {
        LoadState::Idle | LoadState::Loading => {
            view! { <Loading message="Loading events..." /> }.into_view()
        }
        LoadState::Failed(message) => {
            view! { <div class="error-message">{message.to_string()}</div> }.into_view()
        }
        LoadState::Ready(_) => {
            let events: Vec<Event> = page.visible().into_iter().cloned().collect();

            view! {
                <p class="events-count">{page.summary()}</p>
                {if events.is_empty() {
                    view! {
                        <div class="no-events">
                            <p>"No events found matching your criteria"</p>
                        </div>
                    }
                    .into_view()
                } else {
                    view! {
                        <div class="events-grid">
                            {events
                                .into_iter()
                                .map(|event| view! { <EventCard event=event /> })
                                .collect_view()}
                        </div>
                    }
                    .into_view()
                }}
            }
            .into_view()
        }
    }
}
