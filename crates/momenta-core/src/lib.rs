//! # Momenta Core Library
//!
//! This library provides the core business logic for the Momenta habit
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI being a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Day Window**: a fixed 30-slot calendar window around an explicit
//!   `today` (14 days past, today, 15 days future) with a pure toggle
//!   reducer for marking days
//! - **Momentum Engine**: derives the realized momentum trajectory, the
//!   trailing streak, and two forward projections from the window
//! - **Chart Adapter**: maps window + series into labeled datasets for a
//!   line-chart consumer
//! - **Storage**: SQLite-based habit store behind the `HabitStore` gateway
//!   trait, plus TOML-based configuration
//!
//! ## Key Components
//!
//! - [`DayWindow`]: window builder and toggle state machine
//! - [`MomentumEngine`]: pure series derivation
//! - [`HabitTracker`]: window + engine facade with snapshot output
//! - [`Database`]: habit persistence

pub mod chart;
pub mod error;
pub mod habit;
pub mod momentum;
pub mod storage;
pub mod streak;
pub mod tracker;
pub mod window;

pub use chart::{ChartData, ChartSeries};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{Habit, HabitSnapshot, TrackingRecord};
pub use momentum::{MomentumEngine, MomentumParams, MomentumSeries};
pub use storage::{Config, Database, HabitStore};
pub use streak::trailing_streak;
pub use tracker::HabitTracker;
pub use window::{DaySlot, DayWindow, PAST_DAYS, TODAY_INDEX, WINDOW_LEN};
