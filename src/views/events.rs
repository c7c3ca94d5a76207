//! Events view
//!
//! Holds the catalog, the category list and the filter inputs, and keeps
//! the visible list in step with them. Every mutation goes through
//! [`EventsView::dispatch`] or a `finish_*` call, each of which recomputes
//! the visible list.

use futures_util::future::join;

use super::loadable::{LoadState, Loadable, Ticket};
use crate::catalog::{Event, FilterCriteria};
use crate::service::{ClientResult, EventService};

/// User input on the Events view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventsAction {
    SetSearch(String),
    SetCategory(String),
    SetLocation(String),
    ClearFilters,
}

/// State of the Events view
#[derive(Debug, Clone, Default)]
pub struct EventsView {
    catalog: Loadable<Vec<Event>>,
    categories: Vec<String>,
    criteria: FilterCriteria,
    /// Indices into the catalog, in source order
    visible: Vec<usize>,
}

impl EventsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading the catalog
    pub fn begin_load(&mut self) -> Ticket {
        self.catalog.begin()
    }

    /// Apply a catalog response
    pub fn finish_load(&mut self, ticket: Ticket, result: ClientResult<Vec<Event>>) {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Failed to load events");
        }
        if self.catalog.finish(ticket, result) {
            self.recompute();
        }
    }

    /// Apply a categories response; failure only leaves the list empty
    pub fn finish_categories(&mut self, result: ClientResult<Vec<String>>) {
        match result {
            Ok(categories) => self.categories = categories,
            Err(err) => tracing::warn!(error = %err, "Failed to fetch categories"),
        }
    }

    /// Fetch catalog and categories together; neither waits for the other
    pub async fn load<S: EventService + ?Sized>(&mut self, service: &S) {
        let ticket = self.begin_load();
        let (events, categories) = join(service.list_events(), service.list_categories()).await;

        self.finish_categories(categories);
        self.finish_load(ticket, events);
    }

    pub fn dispatch(&mut self, action: EventsAction) {
        tracing::trace!(?action, "Events view action");
        match action {
            EventsAction::SetSearch(term) => self.criteria.search = term,
            EventsAction::SetCategory(category) => self.criteria.category = category,
            EventsAction::SetLocation(location) => self.criteria.location = location,
            EventsAction::ClearFilters => self.criteria.clear(),
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let criteria = &self.criteria;
        self.visible = self
            .catalog
            .data()
            .map(|events| {
                events
                    .iter()
                    .enumerate()
                    .filter(|(_, event)| criteria.matches(event))
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default();
    }

    pub fn state(&self) -> LoadState<'_, Vec<Event>> {
        self.catalog.state()
    }

    /// Events passing the current filter, in catalog order
    pub fn visible(&self) -> Vec<&Event> {
        match self.catalog.data() {
            Some(events) => self.visible.iter().map(|&i| &events[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.catalog.data().map_or(0, Vec::len)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Whether the "Clear Filters" control is shown
    pub fn has_active_filters(&self) -> bool {
        !self.criteria.is_unconstrained()
    }

    /// e.g. "Showing 3 of 10 events"
    pub fn summary(&self) -> String {
        format!("Showing {} of {} events", self.visible.len(), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{api_error, event, FakeService};
    use chrono::{TimeZone, Utc};

    fn jazz_catalog() -> Vec<Event> {
        let date = Utc.with_ymd_and_hms(2030, 5, 1, 18, 0, 0).unwrap();
        vec![
            Event::new("1", "Jazz Night", date, 100)
                .category("Music")
                .location("Downtown Hall")
                .description("Live music"),
            Event::new("2", "Rust Workshop", date, 30)
                .category("Tech")
                .location("Library"),
            Event::new("3", "Rock Gala", date, 200)
                .category("Music")
                .location("Arena"),
        ]
    }

    fn loaded(events: Vec<Event>) -> EventsView {
        let mut view = EventsView::new();
        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(events));
        view
    }

    fn visible_ids(view: &EventsView) -> Vec<String> {
        view.visible().iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_unfiltered_shows_everything() {
        let view = loaded(jazz_catalog());

        assert_eq!(visible_ids(&view), vec!["1", "2", "3"]);
        assert_eq!(view.summary(), "Showing 3 of 3 events");
        assert!(!view.has_active_filters());
    }

    #[test]
    fn test_dispatch_recomputes() {
        let mut view = loaded(jazz_catalog());

        view.dispatch(EventsAction::SetSearch("JAZZ".to_string()));
        assert_eq!(visible_ids(&view), vec!["1"]);

        view.dispatch(EventsAction::SetSearch("rock".to_string()));
        assert_eq!(visible_ids(&view), vec!["3"]);

        view.dispatch(EventsAction::SetSearch(String::new()));
        view.dispatch(EventsAction::SetCategory("Music".to_string()));
        assert_eq!(visible_ids(&view), vec!["1", "3"]);
        assert_eq!(view.summary(), "Showing 2 of 3 events");

        view.dispatch(EventsAction::SetLocation("arena".to_string()));
        assert_eq!(visible_ids(&view), vec!["3"]);
        assert!(view.has_active_filters());

        view.dispatch(EventsAction::ClearFilters);
        assert_eq!(visible_ids(&view), vec!["1", "2", "3"]);
        assert!(!view.has_active_filters());
    }

    #[test]
    fn test_filters_before_load_apply_after() {
        let mut view = EventsView::new();
        view.dispatch(EventsAction::SetCategory("Tech".to_string()));
        assert!(view.visible().is_empty());

        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(jazz_catalog()));
        assert_eq!(visible_ids(&view), vec!["2"]);
    }

    #[test]
    fn test_load_failure_shows_error() {
        let mut view = EventsView::new();
        let ticket = view.begin_load();
        assert_eq!(view.state(), LoadState::Loading);

        view.finish_load(ticket, Err(api_error(500, "Failed to fetch events")));
        assert_eq!(view.state(), LoadState::Failed("Failed to fetch events"));
        assert_eq!(view.total(), 0);
    }

    #[tokio::test]
    async fn test_load_through_service() {
        let service = FakeService::default();
        *service.events.borrow_mut() = Some(Ok(vec![event("a", 3), event("b", 0)]));
        *service.categories.borrow_mut() = Some(Ok(vec!["Music".to_string(), "Tech".to_string()]));

        let mut view = EventsView::new();
        view.load(&service).await;

        assert_eq!(service.calls.get(), 2);
        assert_eq!(view.total(), 2);
        assert_eq!(view.categories(), ["Music", "Tech"]);
    }

    #[tokio::test]
    async fn test_category_failure_does_not_block_catalog() {
        let service = FakeService::default();
        *service.events.borrow_mut() = Some(Ok(vec![event("a", 3)]));
        *service.categories.borrow_mut() = Some(Err(api_error(500, "down")));

        let mut view = EventsView::new();
        view.load(&service).await;

        assert!(matches!(view.state(), LoadState::Ready(_)));
        assert!(view.categories().is_empty());
    }
}
