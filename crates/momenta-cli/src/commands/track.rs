//! Day marking commands.
//!
//! Each command loads the habit's snapshot, replays it into a fresh window
//! for today, applies the requested change through the toggle reducer, and
//! persists the recomputed snapshot.

use chrono::NaiveDate;
use clap::Subcommand;
use momenta_core::storage::{Database, HabitStore};
use momenta_core::{HabitTracker, ValidationError};

use super::{local_today, print_json};

#[derive(Subcommand)]
pub enum TrackAction {
    /// Flip a day's completion state
    Toggle {
        /// Habit ID
        id: i64,
        /// Day to toggle (YYYY-MM-DD, defaults to today)
        date: Option<NaiveDate>,
    },
    /// Mark a day completed
    Done {
        /// Habit ID
        id: i64,
        /// Day to mark (YYYY-MM-DD, defaults to today)
        date: Option<NaiveDate>,
    },
    /// Mark a day incomplete
    Undo {
        /// Habit ID
        id: i64,
        /// Day to mark (YYYY-MM-DD, defaults to today)
        date: Option<NaiveDate>,
    },
}

pub fn run(action: TrackAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let today = local_today();

    let (id, date, mode) = match action {
        TrackAction::Toggle { id, date } => (id, date, Mode::Toggle),
        TrackAction::Done { id, date } => (id, date, Mode::Done),
        TrackAction::Undo { id, date } => (id, date, Mode::Undo),
    };
    let date = date.unwrap_or(today);
    if date > today {
        return Err(Box::new(ValidationError::FutureDate { date }));
    }

    let snapshot = db.load(id)?;
    let mut tracker = HabitTracker::new(today, &snapshot);
    let changed = match mode {
        Mode::Toggle => tracker.toggle_date(date)?,
        Mode::Done => tracker.mark_completed(date)?,
        Mode::Undo => tracker.mark_missed(date)?,
    };
    if changed {
        db.save(id, &tracker.snapshot())?;
    }

    print_json(&serde_json::json!({
        "habitId": id,
        "date": date.to_string(),
        "changed": changed,
        "streak": tracker.streak(),
        "currentMomentum": tracker.current_momentum(),
    }))?;
    Ok(())
}

enum Mode {
    Toggle,
    Done,
    Undo,
}
