mod config;
pub mod database;

pub use config::{ChartConfig, Config, OutputConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::DatabaseError;
use crate::habit::HabitSnapshot;

/// The habit record gateway.
///
/// The derivation core exchanges `{tracking_data, current_momentum}`
/// snapshots with a store at window-change boundaries and knows nothing
/// about the storage engine behind it.
pub trait HabitStore {
    /// Load a habit's snapshot.
    ///
    /// # Errors
    /// Returns an error if the habit does not exist or its stored data
    /// cannot be read.
    fn load(&self, habit_id: i64) -> Result<HabitSnapshot, DatabaseError>;

    /// Replace a habit's snapshot wholesale.
    ///
    /// # Errors
    /// Returns an error if the habit does not exist or the write fails.
    fn save(&self, habit_id: i64, snapshot: &HabitSnapshot) -> Result<(), DatabaseError>;
}

/// Returns `~/.config/momenta[-dev]/` based on MOMENTA_ENV.
///
/// Set MOMENTA_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MOMENTA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("momenta-dev")
    } else {
        base_dir.join("momenta")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
