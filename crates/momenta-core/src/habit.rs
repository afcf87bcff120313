//! Habit model and raw tracking records.
//!
//! A habit owns a sparse list of per-day completion records plus the last
//! derived momentum value. The record list is replaced wholesale on every
//! save; the derivation pipeline never mutates it in place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single day's completion state in persisted form.
///
/// `date` keeps whatever timestamp string the writer produced; matching
/// against window slots is by calendar day only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub date: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl TrackingRecord {
    /// Build a record for a calendar day, stamped at UTC midnight.
    pub fn for_day(day: NaiveDate, is_completed: bool) -> Self {
        Self {
            date: day.and_time(chrono::NaiveTime::MIN).and_utc().to_rfc3339(),
            is_completed,
        }
    }

    /// The calendar day this record refers to, if the date string parses.
    ///
    /// Accepts full RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
    /// Unparsable strings yield `None` and the record is ignored during the
    /// window merge.
    pub fn day(&self) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
        self.date.parse::<NaiveDate>().ok()
    }
}

/// The load/save unit exchanged with the habit store: the full record list
/// and the last value of the current-to-date momentum series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitSnapshot {
    #[serde(rename = "trackingData")]
    pub tracking_data: Vec<TrackingRecord>,
    #[serde(rename = "currentMomentum")]
    pub current_momentum: f64,
}

impl HabitSnapshot {
    /// Snapshot of a freshly created habit: no records, momentum 0.
    pub fn empty() -> Self {
        Self {
            tracking_data: Vec::new(),
            current_momentum: 0.0,
        }
    }
}

/// A stored habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "trackingData")]
    pub tracking_data: Vec<TrackingRecord>,
    #[serde(rename = "currentMomentum")]
    pub current_momentum: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Habit {
    /// The habit's persistable derivation state.
    pub fn snapshot(&self) -> HabitSnapshot {
        HabitSnapshot {
            tracking_data: self.tracking_data.clone(),
            current_momentum: self.current_momentum,
        }
    }
}
