//! Event Card Component

use leptos::*;
use leptos_router::*;

use eventhub::views::EventCardModel;
use eventhub::Event;

/// Summary card linking to an event's details
#[component]
pub fn EventCard(event: Event) -> impl IntoView {
    let card = EventCardModel::new(&event);
    let seats_class = if card.sold_out {
        "event-seats sold-out"
    } else {
        "event-seats"
    };

    view! {
        <A href=card.route.path() class="event-card">
            <div class="event-card-header">
                <h3>{card.name}</h3>
                <span class=format!("category-badge {}", card.category_class)>
                    {card.category}
                </span>
            </div>

            <div class="event-card-body">
                <p class="event-date">"📅 " {card.date}</p>
                <p class="event-location">"📍 " {card.location}</p>
                <p class="event-organizer">"👤 " {card.organizer}</p>
                {card.excerpt.map(|text| view! { <p class="event-description">{text}</p> })}
            </div>

            <div class="event-card-footer">
                <span class=seats_class>{card.seats}</span>
            </div>
        </A>
    }
}
