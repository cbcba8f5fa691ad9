//! Event model

use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};

/// Lifecycle status assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Read-only snapshot of an event as served by `/api/events/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub venue: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: EventStatus,
    #[serde(default)]
    pub registered_count: u32,
    pub max_capacity: u32,
}

/// Color band of the seats-remaining indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatsIndicator {
    /// More than 10 seats left
    Green,
    /// 1 to 10 seats left
    Amber,
    /// Sold out
    Red,
}

impl SeatsIndicator {
    pub fn for_available(available: u32) -> Self {
        match available {
            0 => SeatsIndicator::Red,
            1..=10 => SeatsIndicator::Amber,
            _ => SeatsIndicator::Green,
        }
    }

    /// CSS color used by the page stylesheet
    pub fn color(&self) -> &'static str {
        match self {
            SeatsIndicator::Green => "#10b981",
            SeatsIndicator::Amber => "#f59e0b",
            SeatsIndicator::Red => "#ef4444",
        }
    }
}

impl Event {
    /// Seats still open; never negative even if the backend overbooks
    pub fn available_seats(&self) -> u32 {
        self.max_capacity.saturating_sub(self.registered_count)
    }

    /// Registered share of capacity, rounded to a whole percent
    pub fn capacity_percentage(&self) -> u32 {
        if self.max_capacity == 0 {
            return 0;
        }
        (f64::from(self.registered_count) / f64::from(self.max_capacity) * 100.0).round() as u32
    }

    pub fn seats_indicator(&self) -> SeatsIndicator {
        SeatsIndicator::for_available(self.available_seats())
    }

    /// Ongoing status flag and `start <= now <= end`
    pub fn is_running_at(&self, now: DateTime<Utc>) -> bool {
        self.status == EventStatus::Ongoing && self.start_date <= now && self.end_date >= now
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

/// Accept both integer and string primary keys
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(n) => n.to_string(),
        IdRepr::Text(s) => s,
    })
}
