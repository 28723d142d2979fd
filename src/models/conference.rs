use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::keys::{ConferenceKey, ProfileKey};

/// A conference record.
///
/// The numeric id is store-allocated and only unique within the organizer
/// profile's key scope; `key()` reassembles the full ancestor-scoped key.
/// Conferences are created once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conference {
    id: i64,
    organizer_user_id: String,
    name: String,
    description: Option<String>,
    city: Option<String>,
    topics: Vec<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    max_attendees: Option<i64>,
    seats_available: Option<i64>,
    /// Month of the start date, kept denormalized for month filters.
    month: Option<u32>,
}

impl Conference {
    /// Builds the record from a submitted form plus its allocated key.
    ///
    /// Seats start out equal to the capacity and the month is derived from
    /// the start date.
    pub fn from_form(key: &ConferenceKey, form: ConferenceForm) -> Self {
        let month = form.start_date.map(|d| d.month());
        Self {
            id: key.id(),
            organizer_user_id: key.parent().user_id().to_string(),
            name: form.name,
            description: form.description,
            city: form.city,
            topics: form.topics,
            start_date: form.start_date,
            end_date: form.end_date,
            max_attendees: form.max_attendees,
            seats_available: form.max_attendees,
            month,
        }
    }

    pub fn key(&self) -> ConferenceKey {
        ConferenceKey::new(self.organizer_key(), self.id)
    }

    pub fn organizer_key(&self) -> ProfileKey {
        ProfileKey::new(&self.organizer_user_id)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn organizer_user_id(&self) -> &str {
        &self.organizer_user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn max_attendees(&self) -> Option<i64> {
        self.max_attendees
    }

    pub fn seats_available(&self) -> Option<i64> {
        self.seats_available
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }
}

/// Caller-supplied conference fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConferenceForm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_attendees: Option<i64>,
}
