//! Presentation helpers shared by the CLI and the web front end

use chrono::{DateTime, Local, TimeZone, Utc};

use super::route::Route;
use crate::catalog::Event;
use crate::session::SessionContext;

/// Characters of description shown on a card
pub const EXCERPT_CHARS: usize = 100;

/// e.g. "Sat, Mar 15, 2025, 07:00 PM"
pub fn format_date_short<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%a, %b %-d, %Y, %I:%M %p").to_string()
}

/// e.g. "Saturday, March 15, 2025, 07:00 PM"
pub fn format_date_long<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%A, %B %-d, %Y, %I:%M %p").to_string()
}

/// A server timestamp in the viewer's time zone
pub fn local_time(date: &DateTime<Utc>) -> DateTime<Local> {
    date.with_timezone(&Local)
}

/// First [`EXCERPT_CHARS`] characters, with an ellipsis when cut
pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Availability line of an event
pub fn seats_label(event: &Event) -> String {
    if event.is_sold_out() {
        "Sold Out".to_string()
    } else {
        format!(
            "{} / {} seats available",
            event.available_seats, event.capacity
        )
    }
}

/// CSS modifier for the category badge
pub fn category_class(category: &str) -> String {
    category.to_lowercase()
}

/// Everything an event card renders
#[derive(Debug, Clone, PartialEq)]
pub struct EventCardModel {
    pub route: Route,
    pub name: String,
    pub category: String,
    pub category_class: String,
    pub organizer: String,
    pub location: String,
    pub date: String,
    pub excerpt: Option<String>,
    pub seats: String,
    pub sold_out: bool,
}

impl EventCardModel {
    pub fn new(event: &Event) -> Self {
        Self {
            route: Route::EventDetails(event.id.clone()),
            name: event.name.clone(),
            category: event.category.clone(),
            category_class: category_class(&event.category),
            organizer: event.organizer.clone(),
            location: event.location.clone(),
            date: format_date_short(&local_time(&event.date)),
            excerpt: event.description.as_deref().map(excerpt),
            seats: seats_label(event),
            sold_out: event.is_sold_out(),
        }
    }
}

/// Where a navbar entry leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Route(Route),
    /// Sign out, then go to `/login`
    Logout,
    /// Plain text, not clickable
    Greeting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub target: NavTarget,
}

impl NavItem {
    fn link(label: &str, route: Route) -> Self {
        Self {
            label: label.to_string(),
            target: NavTarget::Route(route),
        }
    }
}

/// Navbar entries for the current session
pub fn nav_items(session: &SessionContext) -> Vec<NavItem> {
    let mut items = vec![NavItem::link("Events", Route::Events)];

    match session.user() {
        Some(user) => {
            items.push(NavItem::link("Dashboard", Route::Dashboard));
            items.push(NavItem {
                label: format!("Hello, {}", user.name),
                target: NavTarget::Greeting,
            });
            items.push(NavItem {
                label: "Logout".to_string(),
                target: NavTarget::Logout,
            });
        }
        None => {
            items.push(NavItem::link("Login", Route::Login));
            items.push(NavItem::link("Sign Up", Route::Register));
        }
    }

    items
}

/// Sign out and return where to go next
pub fn logout(session: &mut SessionContext) -> Route {
    session.logout();
    Route::Login
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::User;
    use crate::session::Session;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 19, 0, 0).unwrap()
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_date_short(&date()), "Sat, Mar 15, 2025, 07:00 PM");
        assert_eq!(format_date_long(&date()), "Saturday, March 15, 2025, 07:00 PM");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");

        let exact = "x".repeat(EXCERPT_CHARS);
        assert_eq!(excerpt(&exact), exact);

        let long = "é".repeat(EXCERPT_CHARS + 5);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_seats_label() {
        let event = Event::new("1", "Gig", date(), 100).seats(12);
        assert_eq!(seats_label(&event), "12 / 100 seats available");

        let event = event.seats(0);
        assert_eq!(seats_label(&event), "Sold Out");
    }

    #[test]
    fn test_card_model() {
        let event = Event::new("7", "Jazz Night", date(), 100)
            .category("Music")
            .organizer("Blue Note")
            .location("Downtown Hall");
        let card = EventCardModel::new(&event);

        assert_eq!(card.route.path(), "/event/7");
        assert_eq!(card.category_class, "music");
        assert_eq!(card.excerpt, None);
        assert_eq!(card.date, format_date_short(&local_time(&date())));
        assert!(!card.sold_out);
    }

    #[test]
    fn test_local_time_keeps_the_instant() {
        let local = local_time(&date());
        assert_eq!(local.with_timezone(&Utc), date());
        assert_eq!(
            format_date_long(&local),
            local.format("%A, %B %-d, %Y, %I:%M %p").to_string()
        );
    }

    #[test]
    fn test_nav_items_signed_out() {
        let items = nav_items(&SessionContext::new());
        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Events", "Login", "Sign Up"]);
    }

    #[test]
    fn test_nav_items_signed_in_and_logout() {
        let mut ctx = SessionContext::new();
        ctx.login(Session::new(User::new("Ada"), "t"));

        let items = nav_items(&ctx);
        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Events", "Dashboard", "Hello, Ada", "Logout"]);
        assert_eq!(items[3].target, NavTarget::Logout);

        assert_eq!(logout(&mut ctx), Route::Login);
        assert!(!ctx.is_authenticated());
    }
}
