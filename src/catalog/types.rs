//! Core data types for the event catalog
//!
//! This module defines the records exchanged with the events API:
//! - `Event`: A schedulable activity with capacity and availability
//! - `EventId`: Opaque identifier of an event
//! - `RegisteredEvent`: An event plus the time the user registered for it
//! - `Registrations`: The user's registrations grouped by the server
//! - `User`: Display identity of the signed-in user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of an event
///
/// Backends disagree on whether ids are strings or integers, so both
/// JSON forms are accepted and normalized to a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EventId(s),
            RawId::Number(n) => EventId(n.to_string()),
        })
    }
}

/// Missing and `null` text fields both decode as empty
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// An event in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// Category label, compared exactly by the category filter
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organizer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    pub capacity: u32,
    pub available_seats: u32,
}

impl Event {
    /// Create an event with full availability
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        date: DateTime<Utc>,
        capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            organizer: String::new(),
            location: String::new(),
            date,
            description: None,
            capacity,
            available_seats: capacity,
        }
    }

    /// Builder method: set category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method: set organizer
    pub fn organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = organizer.into();
        self
    }

    /// Builder method: set location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method: set remaining seats (clamped to capacity)
    pub fn seats(mut self, available: u32) -> Self {
        self.available_seats = available.min(self.capacity);
        self
    }

    /// Whether no seats remain
    pub fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }

    /// Enforce `available_seats <= capacity` on data received from the server
    pub fn normalize(mut self) -> Self {
        if self.available_seats > self.capacity {
            tracing::warn!(
                event_id = %self.id,
                available_seats = self.available_seats,
                capacity = self.capacity,
                "Server reported more seats than capacity, clamping"
            );
            self.available_seats = self.capacity;
        }
        self
    }
}

/// An event the user registered for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisteredEvent {
    #[serde(flatten)]
    pub event: Event,
    pub registered_at: DateTime<Utc>,
}

impl RegisteredEvent {
    pub fn normalize(mut self) -> Self {
        self.event = self.event.normalize();
        self
    }
}

/// A user's registrations, grouped server-side by event date
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Registrations {
    #[serde(default)]
    pub all: Vec<RegisteredEvent>,
    #[serde(default)]
    pub upcoming: Vec<RegisteredEvent>,
    #[serde(default)]
    pub past: Vec<RegisteredEvent>,
}

impl Registrations {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn normalize(self) -> Self {
        Self {
            all: self.all.into_iter().map(RegisteredEvent::normalize).collect(),
            upcoming: self.upcoming.into_iter().map(RegisteredEvent::normalize).collect(),
            past: self.past.into_iter().map(RegisteredEvent::normalize).collect(),
        }
    }
}

/// Display identity of the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
