//! Momentum derivation engine.
//!
//! Momentum is a scalar in `[0, ceiling]` accumulated day by day over the
//! window. Completed days grow a soft streak proxy (`consecutive_days`)
//! whose size feeds back into the gain, so sustained streaks accelerate
//! convexly; missed days subtract a flat penalty that is small relative to
//! the gains, so an isolated miss dents the curve without resetting it.
//!
//! On top of the realized trajectory the engine projects two futures: a
//! sustained scenario (daily completion continues, seeded from the current
//! streak) and an abandoned scenario (no further completions, compounding
//! exponential decay toward zero).

use serde::{Deserialize, Serialize};

use crate::streak::trailing_streak;
use crate::window::{DayWindow, WINDOW_LEN};

/// Tuning parameters for the momentum recurrences.
///
/// Runtime-configurable so tests and simulations can pin them, but never
/// persisted: stored data carries only completion records and the final
/// momentum value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumParams {
    /// Upper clamp for every momentum value.
    pub ceiling: f64,
    /// Streak-proxy growth per completed day.
    pub completed_step: f64,
    /// Streak-proxy growth per missed day.
    pub missed_step: f64,
    /// Momentum gained per unit of streak proxy on a completed day.
    pub gain_rate: f64,
    /// Flat momentum loss on a missed day.
    pub miss_penalty: f64,
    /// Streak-proxy growth per projected day in the sustained scenario.
    pub projected_step: f64,
    /// Exponential decay rate per projected day in the abandoned scenario.
    pub abandon_rate: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            ceiling: 15.0,
            completed_step: 0.7,
            missed_step: 0.01,
            gain_rate: 0.1,
            miss_penalty: 0.2,
            projected_step: 0.4,
            abandon_rate: 0.1,
        }
    }
}

/// The three derived trajectories plus the streak, aligned to the window.
///
/// Each series has exactly 30 positions; `None` marks positions the series
/// does not populate (future days in `current`, past days stay as copies of
/// `current` in the projections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumSeries {
    /// Realized momentum for past and present days, `None` after today.
    pub current: Vec<Option<f64>>,
    /// Projection assuming daily completion from tomorrow on.
    pub sustained: Vec<Option<f64>>,
    /// Projection assuming total abandonment from tomorrow on.
    pub abandoned: Vec<Option<f64>>,
    /// Trailing streak at computation time.
    pub streak: u32,
}

impl MomentumSeries {
    /// The last realized momentum value; 0 when nothing is populated.
    pub fn current_momentum(&self) -> f64 {
        self.current
            .iter()
            .rev()
            .find_map(|v| *v)
            .unwrap_or(0.0)
    }
}

/// Computes momentum series from a day window.
#[derive(Debug, Clone, Default)]
pub struct MomentumEngine {
    params: MomentumParams,
}

impl MomentumEngine {
    /// Engine with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom parameters.
    pub fn with_params(params: MomentumParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MomentumParams {
        &self.params
    }

    /// Derive all three series and the streak from the window.
    ///
    /// Pure: same window in, same series out. O(window length).
    pub fn compute(&self, window: &DayWindow) -> MomentumSeries {
        let streak = trailing_streak(window);
        let current = self.current_series(window);
        let sustained = self.sustained_series(window, &current, streak);
        let abandoned = self.abandoned_series(window, &current);
        MomentumSeries {
            current,
            sustained,
            abandoned,
            streak,
        }
    }

    /// Realized trajectory: fold completion states chronologically up to and
    /// including today.
    fn current_series(&self, window: &DayWindow) -> Vec<Option<f64>> {
        let p = &self.params;
        let today = window.today();
        let mut consecutive_days = 0.0_f64;
        let mut momentum = 0.0_f64;
        let mut series = vec![None; WINDOW_LEN];

        for (i, slot) in window.slots().iter().enumerate() {
            if slot.date > today {
                break;
            }
            if slot.is_completed {
                consecutive_days += p.completed_step;
                momentum = (momentum + p.gain_rate * consecutive_days).min(p.ceiling);
            } else {
                consecutive_days += p.missed_step;
                momentum = (momentum - p.miss_penalty).max(0.0);
            }
            series[i] = Some(momentum);
        }
        series
    }

    /// Sustained scenario: continue the recurrence past today with the
    /// streak count as the seed for the streak proxy.
    fn sustained_series(
        &self,
        window: &DayWindow,
        current: &[Option<f64>],
        streak: u32,
    ) -> Vec<Option<f64>> {
        let p = &self.params;
        let today = window.today();
        let mut series = current.to_vec();
        let mut consecutive_days = f64::from(streak);
        let mut momentum = last_value(current);

        for (i, slot) in window.slots().iter().enumerate() {
            if slot.date <= today {
                continue;
            }
            consecutive_days += p.projected_step;
            momentum = (momentum + p.gain_rate * consecutive_days).min(p.ceiling);
            series[i] = Some(momentum);
        }
        series
    }

    /// Abandoned scenario: compounding exponential decay past today. The
    /// decay deepens with each missed day, so momentum is effectively gone
    /// by the end of the 15-day horizon.
    fn abandoned_series(&self, window: &DayWindow, current: &[Option<f64>]) -> Vec<Option<f64>> {
        let p = &self.params;
        let today = window.today();
        let mut series = current.to_vec();
        let mut momentum = last_value(current);
        let mut missed_days = 0_i32;

        for (i, slot) in window.slots().iter().enumerate() {
            if slot.date <= today {
                continue;
            }
            missed_days += 1;
            momentum = (momentum * (-p.abandon_rate * f64::from(missed_days)).exp()).max(0.0);
            series[i] = Some(momentum);
        }
        series
    }
}

fn last_value(series: &[Option<f64>]) -> f64 {
    series.iter().rev().find_map(|v| *v).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::TrackingRecord;
    use crate::window::TODAY_INDEX;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_history_stays_at_zero() {
        let today = day(2024, 1, 15);
        let window = DayWindow::build(today, &[]);
        let series = MomentumEngine::new().compute(&window);

        assert_eq!(series.streak, 0);
        for i in 0..=TODAY_INDEX {
            assert_close(series.current[i].unwrap(), 0.0);
        }
        for i in TODAY_INDEX + 1..30 {
            assert!(series.current[i].is_none());
        }
        assert_close(series.current_momentum(), 0.0);
    }

    #[test]
    fn single_completion_today_matches_recurrence() {
        let today = day(2024, 1, 15);
        let records = vec![TrackingRecord::for_day(today, true)];
        let window = DayWindow::build(today, &records);
        let series = MomentumEngine::new().compute(&window);

        // 14 misses drift the streak proxy to 0.14 while momentum floors at
        // 0; the completed day then gains 0.1 * (0.14 + 0.7).
        let m_today = 0.1 * (14.0 * 0.01 + 0.7);
        assert_close(series.current[TODAY_INDEX].unwrap(), m_today);
        // The trailing scan runs over the whole window, so the empty future
        // slots break the run before it reaches today.
        assert_eq!(series.streak, 0);

        // First abandoned step: m * e^-0.1.
        assert_close(
            series.abandoned[TODAY_INDEX + 1].unwrap(),
            m_today * (-0.1_f64).exp(),
        );
    }

    #[test]
    fn completed_run_accelerates_convexly() {
        let today = day(2024, 1, 15);
        let records: Vec<_> = (0..15)
            .map(|i| TrackingRecord::for_day(day(2024, 1, 1 + i), true))
            .collect();
        let window = DayWindow::build(today, &records);
        let series = MomentumEngine::new().compute(&window);

        // Increments themselves grow: m[i+1]-m[i] > m[i]-m[i-1].
        let values: Vec<f64> = series.current[..=TODAY_INDEX]
            .iter()
            .map(|v| v.unwrap())
            .collect();
        for i in 2..values.len() {
            let prev_gain = values[i - 1] - values[i - 2];
            let gain = values[i] - values[i - 1];
            assert!(gain > prev_gain, "gain should accelerate at step {i}");
        }
    }

    #[test]
    fn momentum_is_clamped_at_the_ceiling() {
        let params = MomentumParams {
            ceiling: 2.0,
            ..MomentumParams::default()
        };
        let today = day(2024, 1, 15);
        let records: Vec<_> = (0..15)
            .map(|i| TrackingRecord::for_day(day(2024, 1, 1 + i), true))
            .collect();
        let window = DayWindow::build(today, &records);
        let series = MomentumEngine::with_params(params).compute(&window);

        for v in series.current.iter().chain(&series.sustained).flatten() {
            assert!(*v <= 2.0);
        }
        assert_close(series.current[TODAY_INDEX].unwrap(), 2.0);
    }

    #[test]
    fn misses_floor_at_zero() {
        let today = day(2024, 1, 15);
        let records = vec![TrackingRecord::for_day(day(2024, 1, 1), true)];
        let window = DayWindow::build(today, &records);
        let series = MomentumEngine::new().compute(&window);

        // One completion (0.07) followed by 14 misses of 0.2 each.
        assert_close(series.current[0].unwrap(), 0.07);
        assert_close(series.current[TODAY_INDEX].unwrap(), 0.0);
    }

    #[test]
    fn projections_cover_exactly_the_future_slots() {
        let today = day(2024, 1, 15);
        let window = DayWindow::build(today, &[TrackingRecord::for_day(today, true)]);
        let series = MomentumEngine::new().compute(&window);

        for i in 0..=TODAY_INDEX {
            assert_eq!(series.sustained[i], series.current[i]);
            assert_eq!(series.abandoned[i], series.current[i]);
        }
        for i in TODAY_INDEX + 1..30 {
            assert!(series.sustained[i].is_some());
            assert!(series.abandoned[i].is_some());
        }
    }

    #[test]
    fn sustained_projection_seeds_from_streak() {
        let today = day(2024, 1, 15);
        let records: Vec<_> = (0..3)
            .map(|i| TrackingRecord::for_day(day(2024, 1, 13 + i), true))
            .collect();
        let window = DayWindow::build(today, &records);
        let series = MomentumEngine::new().compute(&window);
        assert_eq!(series.streak, 0); // future slots break the trailing run

        let last = series.current_momentum();
        // First projected step: consecutive_days = streak + 0.4.
        let expected = (last + 0.1 * (f64::from(series.streak) + 0.4)).min(15.0);
        assert_close(series.sustained[TODAY_INDEX + 1].unwrap(), expected);
    }

    #[test]
    fn projections_diverge_when_momentum_exists() {
        let today = day(2024, 1, 15);
        let records: Vec<_> = (0..6)
            .map(|i| TrackingRecord::for_day(day(2024, 1, 10 + i), true))
            .collect();
        let window = DayWindow::build(today, &records);
        let series = MomentumEngine::new().compute(&window);

        assert!(series.sustained[29].unwrap() >= series.abandoned[29].unwrap());
        assert!(series.sustained[29].unwrap() > series.current_momentum());
        assert!(series.abandoned[29].unwrap() < series.current_momentum());
    }

    #[test]
    fn abandoned_decay_compounds() {
        let today = day(2024, 1, 15);
        let records: Vec<_> = (0..10)
            .map(|i| TrackingRecord::for_day(day(2024, 1, 6 + i), true))
            .collect();
        let window = DayWindow::build(today, &records);
        let series = MomentumEngine::new().compute(&window);

        let m0 = series.current_momentum();
        let d1 = series.abandoned[TODAY_INDEX + 1].unwrap();
        let d2 = series.abandoned[TODAY_INDEX + 2].unwrap();
        assert_close(d1, m0 * (-0.1_f64).exp());
        assert_close(d2, d1 * (-0.2_f64).exp());
        // Near-zero by the end of the horizon.
        assert!(series.abandoned[29].unwrap() < m0 * 1e-4);
    }

    #[test]
    fn current_momentum_is_last_realized_value() {
        let today = day(2024, 1, 15);
        let records = vec![TrackingRecord::for_day(day(2024, 1, 14), true)];
        let window = DayWindow::build(today, &records);
        let series = MomentumEngine::new().compute(&window);

        // Jan 14 completes after 13 drifting misses, today misses (-0.2
        // floored at 0).
        assert_close(series.current[13].unwrap(), 0.1 * (13.0 * 0.01 + 0.7));
        assert_close(series.current_momentum(), 0.0);
        assert_eq!(
            series.current_momentum(),
            series.current[TODAY_INDEX].unwrap()
        );
    }
}
