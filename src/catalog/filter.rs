//! Event filter
//!
//! Narrows a catalog by free-text search, category and location.
//! All criteria are combined with AND, and an empty criterion places no
//! constraint. Source order is preserved.

use serde::{Deserialize, Serialize};

use super::types::Event;

/// Filter inputs of the Events view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the name or description
    #[serde(default)]
    pub search: String,
    /// Exact category label
    #[serde(default)]
    pub category: String,
    /// Case-insensitive substring of the location
    #[serde(default)]
    pub location: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Builder method: set category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method: set location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// True when no criterion is set
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty() && self.category.is_empty() && self.location.is_empty()
    }

    /// Reset every criterion
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check a single event against all criteria
    pub fn matches(&self, event: &Event) -> bool {
        self.matches_search(event) && self.matches_category(event) && self.matches_location(event)
    }

    fn matches_search(&self, event: &Event) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();

        // A missing description never matches; the name alone still can.
        event.name.to_lowercase().contains(&needle)
            || event
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, event: &Event) -> bool {
        self.category.is_empty() || event.category == self.category
    }

    fn matches_location(&self, event: &Event) -> bool {
        self.location.is_empty()
            || event
                .location
                .to_lowercase()
                .contains(&self.location.to_lowercase())
    }
}

/// Select the events matching `criteria`, in source order
pub fn filter_events<'a, I>(events: I, criteria: &FilterCriteria) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| criteria.matches(event))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn catalog() -> Vec<Event> {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 20, 0, 0).unwrap();
        vec![
            Event::new("1", "Jazz Night", date, 100)
                .category("Music")
                .location("Downtown Hall")
                .description("Live music"),
            Event::new("2", "RustConf Meetup", date, 40)
                .category("Tech")
                .location("Uptown Library")
                .description("Talks about async jazz hands"),
            Event::new("3", "Rock Festival", date, 5000)
                .category("Music")
                .location("Riverside Park"),
            Event::new("4", "Startup Pitch", date, 80)
                .category("Tech")
                .location("downtown incubator"),
            Event::new("5", "Open Mic", date, 30)
                .category("music")
                .location("Cafe Luna")
                .description("Bring your guitar"),
        ]
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_unconstrained_is_identity() {
        let events = catalog();
        let result = filter_events(&events, &FilterCriteria::new());

        assert_eq!(result.len(), events.len());
        assert!(result.iter().zip(events.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let events = catalog();

        for term in ["jazz", "JAZZ", "Jazz"] {
            let result = filter_events(&events, &FilterCriteria::new().search(term));
            assert!(ids(&result).contains(&"1".to_string()), "term {term}");
        }

        let result = filter_events(&events, &FilterCriteria::new().search("rock"));
        assert!(!ids(&result).contains(&"1".to_string()));
    }

    #[test]
    fn test_search_matches_description() {
        let events = catalog();
        let result = filter_events(&events, &FilterCriteria::new().search("jazz"));

        // Name hit and description hit, in source order
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn test_missing_description_falls_back_to_name() {
        let events = catalog();

        let result = filter_events(&events, &FilterCriteria::new().search("festival"));
        assert_eq!(ids(&result), vec!["3"]);

        let result = filter_events(&events, &FilterCriteria::new().search("outdoor"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_category_is_exact() {
        let events = catalog();
        let result = filter_events(&events, &FilterCriteria::new().category("Music"));

        assert_eq!(ids(&result), vec!["1", "3"]);
        assert!(result.iter().all(|e| e.category == "Music"));

        // Substrings do not match
        let result = filter_events(&events, &FilterCriteria::new().category("Mus"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_location_is_case_insensitive_substring() {
        let events = catalog();
        let result = filter_events(&events, &FilterCriteria::new().location("DOWNTOWN"));

        assert_eq!(ids(&result), vec!["1", "4"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let events = catalog();
        let criteria = FilterCriteria::new()
            .category("Tech")
            .location("downtown");
        let result = filter_events(&events, &criteria);

        assert_eq!(ids(&result), vec!["4"]);
    }

    #[test]
    fn test_result_is_subset_and_idempotent() {
        let events = catalog();
        let cases = [
            FilterCriteria::new().search("a"),
            FilterCriteria::new().category("Music").search("night"),
            FilterCriteria::new().location("park"),
            FilterCriteria::new().search("zzz"),
        ];

        for criteria in &cases {
            let once = filter_events(&events, criteria);
            assert!(once.iter().all(|e| events.contains(e)));

            let twice = filter_events(once.iter().copied(), criteria);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_clear_resets_criteria() {
        let mut criteria = FilterCriteria::new().search("x").category("Tech").location("y");
        assert!(!criteria.is_unconstrained());

        criteria.clear();
        assert!(criteria.is_unconstrained());
    }
}
