//! Event Details Page
//!
//! One event plus the registration control.

use leptos::*;
use leptos_router::*;

use eventhub::views::present::{format_date_long, local_time, seats_label};
use eventhub::views::{ActionControl, EventDetailsView, LoadState, RegistrationStep};
use eventhub::{EventId, EventService};

use crate::api;
use crate::components::Loading;
use crate::state::global::use_global_state;

/// Event details page component
#[component]
pub fn EventDetails() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();
    let params = use_params_map();

    let event_id = move || {
        params.with(|p| EventId::from(p.get("id").cloned().unwrap_or_default()))
    };

    let page = create_rw_signal(EventDetailsView::new(event_id()));

    // Reload whenever the id in the path changes
    create_effect(move |_| {
        let id = event_id();
        page.set(EventDetailsView::new(id.clone()));

        spawn_local(async move {
            let Some(ticket) = page.try_update(EventDetailsView::begin_load) else {
                return;
            };
            let result = api::service().get_event(&id).await;
            page.try_update(|p| {
                // A newer id owns the page now
                if p.id() == &id {
                    p.finish_load(ticket, result);
                }
            });
        });
    });

    let navigate_for_register = navigate.clone();
    let on_register = move |_| {
        let session = state.session_untracked();
        let step = page.try_update(|p| p.begin_registration(session.as_ref()));

        match step {
            Some(Ok(RegistrationStep::RedirectToLogin(route))) => {
                navigate_for_register(&route.path(), Default::default());
            }
            Some(Ok(RegistrationStep::Submit(id))) => {
                let navigate = navigate_for_register.clone();
                spawn_local(async move {
                    let Some(session) = session else {
                        return;
                    };
                    let result = api::service().register(&session, &id).await;

                    if let Some(Some(next)) = page.try_update(|p| p.complete_registration(result)) {
                        let path = next.to.path();
                        gloo_timers::callback::Timeout::new(next.after_millis(), move || {
                            navigate(&path, Default::default());
                        })
                        .forget();
                    }
                });
            }
            Some(Err(err)) => {
                web_sys::console::warn_1(&format!("Registration refused: {}", err).into());
            }
            None => {}
        }
    };

    let navigate_back = navigate.clone();
    let on_back = move |_| {
        let route = page.with_untracked(|p| p.back());
        navigate_back(&route.path(), Default::default());
    };

    view! {
        <div class="event-details-page">
            <button on:click=on_back class="back-btn">"← Back to Events"</button>

            {move || {
                let session = state.current_session();
                page.with(|p| match p.state() {
                    LoadState::Idle | LoadState::Loading => {
                        view! { <Loading message="Loading event details..." /> }.into_view()
                    }
                    LoadState::Failed(message) => {
                        view! { <div class="error-message">{message.to_string()}</div> }.into_view()
                    }
                    _ => match p.event() {
                        Some(event) => {
                            let action = p.action(session.as_ref());
                            view! {
                                <div class="event-details-card">
                                    <div class="event-details-header">
                                        <h1>{event.name.clone()}</h1>
                                        <span class=format!("category-badge {}", event.category.to_lowercase())>
                                            {event.category.clone()}
                                        </span>
                                    </div>

                                    {p.message().map(|m| view! { <div class="success-message">{m.to_string()}</div> })}
                                    {p.error().map(|e| view! { <div class="error-message">{e.to_string()}</div> })}

                                    <div class="event-details-info">
                                        <p><strong>"📅 Date: "</strong>{format_date_long(&local_time(&event.date))}</p>
                                        <p><strong>"📍 Location: "</strong>{event.location.clone()}</p>
                                        <p><strong>"👤 Organizer: "</strong>{event.organizer.clone()}</p>
                                        <p><strong>"👥 Capacity: "</strong>{event.capacity}</p>
                                        <p><strong>"🎟️ Available: "</strong>{seats_label(event)}</p>
                                    </div>

                                    {event.description.clone().map(|d| view! {
                                        <div class="event-description">
                                            <h2>"About this event"</h2>
                                            <p>{d}</p>
                                        </div>
                                    })}

                                    {action.map(|action| render_action(action, on_register.clone()))}
                                </div>
                            }
                            .into_view()
                        }
                        None => view! { <div class="error-message">"Event not found"</div> }.into_view(),
                    },
                })
            }}
        </div>
    }
}

fn render_action<F>(action: ActionControl, on_register: F) -> View
where
    F: Fn(leptos::ev::MouseEvent) + 'static,
{
    let class = match action {
        ActionControl::SoldOut => "register-btn sold-out",
        _ => "register-btn",
    };

    view! {
        <button on:click=on_register class=class disabled=!action.is_enabled()>
            {action.label()}
        </button>
    }
    .into_view()
}
