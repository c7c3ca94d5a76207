//! Dashboard Page
//!
//! The signed-in user's registrations, with cancellation of upcoming ones.

use leptos::*;
use leptos_router::*;

use eventhub::views::present::{format_date_long, format_date_short, local_time};
use eventhub::views::{CancelStep, DashboardView, LoadState};
use eventhub::{EventId, EventService, RegisteredEvent, Route, Session};

use crate::api;
use crate::components::Loading;
use crate::state::global::use_global_state;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();
    let page = create_rw_signal(DashboardView::new());

    // Signed out: go to login. Signed in: load registrations.
    create_effect(move |_| match state.current_session() {
        None => {
            if let Some(route) = DashboardView::guard(None) {
                navigate(&route.path(), Default::default());
            }
        }
        Some(session) => spawn_local(load(page, session)),
    });

    let on_cancel = Callback::new(move |id: EventId| {
        let Some(session) = state.session_untracked() else {
            return;
        };

        let step = page.try_update(|p| {
            p.begin_cancel(&id, |prompt| {
                window().confirm_with_message(prompt).unwrap_or(false)
            })
        });

        if let Some(CancelStep::Submit(id)) = step {
            spawn_local(async move {
                let result = api::service().cancel_registration(&session, &id).await;

                match page.try_update(|p| p.finish_cancel(&id, result)) {
                    Some(notice) => state.notify(notice),
                    None => return,
                }

                load(page, session).await;
            });
        }
    });

    view! {
        <div class="dashboard-page">
            {move || {
                let name = state
                    .current_session()
                    .map(|s| s.user.name)
                    .unwrap_or_default();

                page.with(|p| match p.state() {
                    LoadState::Idle | LoadState::Loading => {
                        view! { <Loading message="Loading your dashboard..." /> }.into_view()
                    }
                    _ => render_dashboard(p, &name, on_cancel),
                })
            }}
        </div>
    }
}

async fn load(page: RwSignal<DashboardView>, session: Session) {
    let Some(ticket) = page.try_update(DashboardView::begin_load) else {
        return;
    };
    let result = api::service().registrations(&session).await;
    page.try_update(|p| p.finish_load(ticket, result));
}

fn render_dashboard(page: &DashboardView, name: &str, on_cancel: Callback<EventId>) -> View {
    let stats = page.stats();

    view! {
        <div class="dashboard-header">
            <h1>{format!("Welcome back, {}!", name)}</h1>
            <p>"Manage your event registrations"</p>
        </div>

        {page.error().map(|e| view! { <div class="error-message">{e.to_string()}</div> })}

        <div class="dashboard-stats">
            <StatCard value=stats.total label="Total Registrations" />
            <StatCard value=stats.upcoming label="Upcoming Events" />
            <StatCard value=stats.past label="Past Events" />
        </div>

        {if page.is_empty() {
            view! {
                <div class="no-registrations">
                    <h2>"No Event Registrations Yet"</h2>
                    <p>"Start exploring and register for exciting events!"</p>
                    <A href=Route::Events.path() class="browse-events-btn">"Browse Events"</A>
                </div>
            }
            .into_view()
        } else {
            view! {
                {render_section(page, "Upcoming Events", page.upcoming(), Some(on_cancel))}
                {render_section(page, "Past Events", page.past(), None)}
            }
            .into_view()
        }}
    }
    .into_view()
}

#[component]
fn StatCard(value: usize, label: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-number">{value}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}

fn render_section(
    page: &DashboardView,
    title: &'static str,
    registrations: &[RegisteredEvent],
    on_cancel: Option<Callback<EventId>>,
) -> View {
    if registrations.is_empty() {
        return ().into_view();
    }

    view! {
        <div class="dashboard-section">
            <h2>{title}</h2>
            <div class="dashboard-events-grid">
                {registrations
                    .iter()
                    .map(|registered| {
                        let id = &registered.event.id;
                        let cancel = on_cancel.map(|on_cancel| CancelControl {
                            label: page.cancel_label(id),
                            busy: page.is_cancelling(id),
                            on_cancel,
                        });
                        view! { <RegistrationCard registered=registered.clone() cancel=cancel /> }
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_view()
}

#[derive(Clone, Copy)]
struct CancelControl {
    label: &'static str,
    busy: bool,
    on_cancel: Callback<EventId>,
}

/// One registration; past ones have no cancel control
#[component]
fn RegistrationCard(registered: RegisteredEvent, cancel: Option<CancelControl>) -> impl IntoView {
    let navigate = use_navigate();
    let event = registered.event;
    let details = Route::EventDetails(event.id.clone()).path();
    let id = event.id.clone();

    view! {
        <div class=if cancel.is_some() { "dashboard-event-card" } else { "dashboard-event-card past" }>
            <div class="dashboard-event-header">
                <h3>{event.name.clone()}</h3>
                <span class=format!("category-badge {}", event.category.to_lowercase())>
                    {event.category.clone()}
                </span>
            </div>

            <div class="dashboard-event-info">
                <p><strong>"📅 Date: "</strong>{format_date_long(&local_time(&event.date))}</p>
                <p><strong>"📍 Location: "</strong>{event.location.clone()}</p>
                <p><strong>"👤 Organizer: "</strong>{event.organizer.clone()}</p>
                <p><strong>"🎟️ Registered: "</strong>{format_date_short(&local_time(&registered.registered_at))}</p>
            </div>

            <div class="dashboard-event-actions">
                <button
                    on:click=move |_| navigate(&details, Default::default())
                    class="view-event-btn"
                >
                    "View Details"
                </button>
                {cancel.map(|c| view! {
                    <CancelButton id=id label=c.label busy=c.busy on_cancel=c.on_cancel />
                })}
            </div>
        </div>
    }
}

#[component]
fn CancelButton(
    id: EventId,
    label: &'static str,
    busy: bool,
    on_cancel: Callback<EventId>,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| on_cancel.call(id.clone())
            class="cancel-registration-btn"
            disabled=busy
        >
            {label}
        </button>
    }
}
