//! Day window builder and toggle reducer.
//!
//! The working unit of the tracker is a fixed 30-slot window of calendar
//! days anchored on "today": 14 days of history, today, 15 days of future.
//! Stored tracking records are merged into the window once at build time;
//! after that the slots are the single source of truth, so a live toggle
//! overrides whatever the store said for the same day.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::habit::TrackingRecord;

/// Number of slots in the window.
pub const WINDOW_LEN: usize = 30;
/// Days of history before today.
pub const PAST_DAYS: u64 = 14;
/// Index of "today" within the window.
pub const TODAY_INDEX: usize = PAST_DAYS as usize;

/// One calendar day in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    pub date: NaiveDate,
    pub is_completed: bool,
}

/// The 30-day working window around an explicit `today`.
///
/// Invariant: `slots[i].date == today - 14 + i` for all `i`, dates strictly
/// increasing by one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWindow {
    today: NaiveDate,
    slots: Vec<DaySlot>,
}

impl DayWindow {
    /// Build the window for `today`, merging stored records by calendar-day
    /// equality. Days without a matching record default to incomplete;
    /// records whose date string does not parse match nothing.
    pub fn build(today: NaiveDate, records: &[TrackingRecord]) -> Self {
        let start = today - Days::new(PAST_DAYS);
        let slots = (0..WINDOW_LEN as u64)
            .map(|offset| {
                let date = start + Days::new(offset);
                let is_completed = records
                    .iter()
                    .find(|r| r.day() == Some(date))
                    .map(|r| r.is_completed)
                    .unwrap_or(false);
                DaySlot { date, is_completed }
            })
            .collect();
        Self { today, slots }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn slots(&self) -> &[DaySlot] {
        &self.slots
    }

    /// Slot index for a calendar day, if it falls inside the window.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let start = self.today - Days::new(PAST_DAYS);
        let offset = date.signed_duration_since(start).num_days();
        if (0..WINDOW_LEN as i64).contains(&offset) {
            Some(offset as usize)
        } else {
            None
        }
    }

    /// Whether the slot at `index` lies strictly after today.
    pub fn is_future(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .map(|slot| slot.date > self.today)
            .unwrap_or(false)
    }

    /// Flip the completion state of the slot at `index`.
    ///
    /// Future slots are not editable: the toggle is a silent no-op and
    /// returns `Ok(false)`. Past and present slots flip unconditionally and
    /// return `Ok(true)`; toggling twice restores the prior state.
    ///
    /// # Errors
    /// Returns `ValidationError::OutOfBounds` if `index` is not a window
    /// position.
    pub fn toggle(&mut self, index: usize) -> Result<bool, ValidationError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ValidationError::OutOfBounds {
                collection: "window".to_string(),
                index,
                len,
            })?;
        if slot.date > self.today {
            return Ok(false);
        }
        slot.is_completed = !slot.is_completed;
        Ok(true)
    }

    /// Re-serialize the window as tracking records covering exactly the 30
    /// window days, stamped at UTC midnight.
    pub fn to_tracking_records(&self) -> Vec<TrackingRecord> {
        self.slots
            .iter()
            .map(|slot| TrackingRecord::for_day(slot.date, slot.is_completed))
            .collect()
    }
}
