//! Habit tracker facade.
//!
//! Ties the window, the momentum engine, and the persistable snapshot
//! together. Every mutation goes through the window's toggle reducer and is
//! followed by an eager recompute of all derived series, so the tracker's
//! state is always consistent with its window. `today` is an explicit input
//! throughout; nothing here reads the wall clock.

use chrono::NaiveDate;

use crate::chart::ChartData;
use crate::error::{CoreError, ValidationError};
use crate::habit::HabitSnapshot;
use crate::momentum::{MomentumEngine, MomentumParams, MomentumSeries};
use crate::storage::HabitStore;
use crate::window::DayWindow;

/// One habit's working state: the 30-day window plus derived series.
#[derive(Debug, Clone)]
pub struct HabitTracker {
    window: DayWindow,
    engine: MomentumEngine,
    series: MomentumSeries,
}

impl HabitTracker {
    /// Build the tracker for `today` from a stored snapshot.
    pub fn new(today: NaiveDate, snapshot: &HabitSnapshot) -> Self {
        Self::with_params(today, snapshot, MomentumParams::default())
    }

    /// Build with custom engine parameters.
    pub fn with_params(today: NaiveDate, snapshot: &HabitSnapshot, params: MomentumParams) -> Self {
        let window = DayWindow::build(today, &snapshot.tracking_data);
        let engine = MomentumEngine::with_params(params);
        let series = engine.compute(&window);
        Self {
            window,
            engine,
            series,
        }
    }

    pub fn window(&self) -> &DayWindow {
        &self.window
    }

    pub fn series(&self) -> &MomentumSeries {
        &self.series
    }

    pub fn streak(&self) -> u32 {
        self.series.streak
    }

    pub fn current_momentum(&self) -> f64 {
        self.series.current_momentum()
    }

    /// Toggle the slot at `index` and recompute the derived series.
    ///
    /// Returns whether anything changed (future slots are no-ops).
    ///
    /// # Errors
    /// Returns `ValidationError::OutOfBounds` for indices outside the window.
    pub fn toggle(&mut self, index: usize) -> Result<bool, ValidationError> {
        let changed = self.window.toggle(index)?;
        if changed {
            self.series = self.engine.compute(&self.window);
        }
        Ok(changed)
    }

    /// Toggle a slot by calendar day.
    ///
    /// # Errors
    /// Returns `ValidationError::OutsideWindow` if `date` does not fall in
    /// the 30-day window.
    pub fn toggle_date(&mut self, date: NaiveDate) -> Result<bool, ValidationError> {
        let index = self
            .window
            .index_of(date)
            .ok_or(ValidationError::OutsideWindow {
                date,
                today: self.window.today(),
            })?;
        self.toggle(index)
    }

    /// Mark a day completed, toggling only if it is not already.
    ///
    /// # Errors
    /// Same conditions as [`HabitTracker::toggle_date`].
    pub fn mark_completed(&mut self, date: NaiveDate) -> Result<bool, ValidationError> {
        self.set_completed(date, true)
    }

    /// Mark a day incomplete, toggling only if it is currently completed.
    ///
    /// # Errors
    /// Same conditions as [`HabitTracker::toggle_date`].
    pub fn mark_missed(&mut self, date: NaiveDate) -> Result<bool, ValidationError> {
        self.set_completed(date, false)
    }

    fn set_completed(&mut self, date: NaiveDate, completed: bool) -> Result<bool, ValidationError> {
        let index = self
            .window
            .index_of(date)
            .ok_or(ValidationError::OutsideWindow {
                date,
                today: self.window.today(),
            })?;
        if self.window.slots()[index].is_completed == completed {
            return Ok(false);
        }
        self.toggle(index)
    }

    /// Toggle a day and, if anything changed, push the recomputed snapshot
    /// out through the gateway.
    ///
    /// The save is owned by the store: a failure surfaces as an error here
    /// and is not retried.
    ///
    /// # Errors
    /// Returns a validation error for dates outside the window, or the
    /// store's error if persisting fails.
    pub fn toggle_and_save<S: HabitStore>(
        &mut self,
        store: &S,
        habit_id: i64,
        date: NaiveDate,
    ) -> Result<bool, CoreError> {
        let changed = self.toggle_date(date)?;
        if changed {
            store.save(habit_id, &self.snapshot())?;
        }
        Ok(changed)
    }

    /// Chart datasets for the current state.
    pub fn chart_data(&self) -> ChartData {
        ChartData::from_series(&self.window, &self.series)
    }

    /// The persistable form: all 30 window days re-serialized plus the last
    /// realized momentum value.
    pub fn snapshot(&self) -> HabitSnapshot {
        HabitSnapshot {
            tracking_data: self.window.to_tracking_records(),
            current_momentum: self.series.current_momentum(),
        }
    }
}
