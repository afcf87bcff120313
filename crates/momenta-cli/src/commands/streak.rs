//! Streak and momentum summary.

use momenta_core::storage::{Database, HabitStore};
use momenta_core::HabitTracker;

use super::{local_today, print_json};

pub fn run(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let snapshot = db.load(id)?;
    let tracker = HabitTracker::new(local_today(), &snapshot);

    print_json(&serde_json::json!({
        "habitId": id,
        "streak": tracker.streak(),
        "currentMomentum": tracker.current_momentum(),
    }))?;
    Ok(())
}
