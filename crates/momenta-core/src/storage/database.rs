//! SQLite-backed habit storage.
//!
//! Owns the habit rows and implements the [`HabitStore`] gateway: the full
//! tracking record list is stored as a JSON column and replaced wholesale on
//! every save, alongside the last derived momentum value.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, HabitStore};
use crate::error::DatabaseError;
use crate::habit::{Habit, HabitSnapshot, TrackingRecord};

/// SQLite database for habit storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/momenta/momenta.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let dir = data_dir().map_err(|source| DatabaseError::DataDirFailed {
            path: std::path::PathBuf::from("~/.config/momenta"),
            source,
        })?;
        Self::open_at(dir.join("momenta.db"))
    }

    /// Open a database at an explicit path, creating the schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl Into<std::path::PathBuf>) -> Result<Self, DatabaseError> {
        let path = path.into();
        let conn =
            Connection::open(&path).map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests and ephemeral use).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS habits (
                    id               INTEGER PRIMARY KEY AUTOINCREMENT,
                    name             TEXT NOT NULL,
                    description      TEXT NOT NULL DEFAULT '',
                    tracking_data    TEXT NOT NULL DEFAULT '[]',
                    current_momentum REAL NOT NULL DEFAULT 0,
                    created_at       TEXT NOT NULL,
                    updated_at       TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Insert a new habit with no tracking data and momentum 0.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn create_habit(&self, name: &str, description: &str) -> Result<Habit, DatabaseError> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO habits (name, description, tracking_data, current_momentum, created_at, updated_at)
             VALUES (?1, ?2, '[]', 0, ?3, ?3)",
            params![name, description, now.to_rfc3339()],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_habit(id)
    }

    /// Fetch a habit by id.
    ///
    /// # Errors
    /// Returns `HabitNotFound` if no row matches, or an error if the stored
    /// tracking data cannot be decoded.
    pub fn get_habit(&self, id: i64) -> Result<Habit, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, tracking_data, current_momentum, created_at, updated_at
             FROM habits WHERE id = ?1",
        )?;
        let row = stmt
            .query_row(params![id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })
            .optional()?;

        let (id, name, description, tracking_json, current_momentum, created_at, updated_at) =
            row.ok_or(DatabaseError::HabitNotFound(id))?;
        let tracking_data = decode_tracking(id, &tracking_json)?;
        Ok(Habit {
            id,
            name,
            description,
            tracking_data,
            current_momentum,
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
        })
    }

    /// List all habits, oldest first.
    ///
    /// # Errors
    /// Returns an error if the query fails or any row cannot be decoded.
    pub fn list_habits(&self) -> Result<Vec<Habit>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, tracking_data, current_momentum, created_at, updated_at
             FROM habits ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut habits = Vec::new();
        for row in rows {
            let (id, name, description, tracking_json, current_momentum, created_at, updated_at) =
                row?;
            habits.push(Habit {
                id,
                name,
                description,
                tracking_data: decode_tracking(id, &tracking_json)?,
                current_momentum,
                created_at: parse_timestamp(&created_at),
                updated_at: parse_timestamp(&updated_at),
            });
        }
        Ok(habits)
    }

    /// Delete a habit and all its tracking data.
    ///
    /// # Errors
    /// Returns `HabitNotFound` if no row matches.
    pub fn delete_habit(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(DatabaseError::HabitNotFound(id));
        }
        Ok(())
    }
}

impl HabitStore for Database {
    fn load(&self, habit_id: i64) -> Result<HabitSnapshot, DatabaseError> {
        let habit = self.get_habit(habit_id)?;
        Ok(habit.snapshot())
    }

    fn save(&self, habit_id: i64, snapshot: &HabitSnapshot) -> Result<(), DatabaseError> {
        let tracking_json = serde_json::to_string(&snapshot.tracking_data)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let affected = self.conn.execute(
            "UPDATE habits
             SET tracking_data = ?1, current_momentum = ?2, updated_at = ?3
             WHERE id = ?4",
            params![
                tracking_json,
                snapshot.current_momentum,
                Utc::now().to_rfc3339(),
                habit_id
            ],
        )?;
        if affected == 0 {
            return Err(DatabaseError::HabitNotFound(habit_id));
        }
        Ok(())
    }
}

fn decode_tracking(habit_id: i64, json: &str) -> Result<Vec<TrackingRecord>, DatabaseError> {
    serde_json::from_str(json).map_err(|e| DatabaseError::CorruptTrackingData {
        habit_id,
        message: e.to_string(),
    })
}

/// Parse an RFC 3339 timestamp column, falling back to now on corruption.
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_get() {
        let db = Database::open_memory().unwrap();
        let habit = db.create_habit("Read", "20 pages a day").unwrap();

        assert_eq!(habit.name, "Read");
        assert_eq!(habit.description, "20 pages a day");
        assert!(habit.tracking_data.is_empty());
        assert_eq!(habit.current_momentum, 0.0);

        let fetched = db.get_habit(habit.id).unwrap();
        assert_eq!(fetched.name, "Read");
    }

    #[test]
    fn get_missing_habit_fails() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.get_habit(99),
            Err(DatabaseError::HabitNotFound(99))
        ));
    }

    #[test]
    fn list_orders_by_id() {
        let db = Database::open_memory().unwrap();
        db.create_habit("A", "").unwrap();
        db.create_habit("B", "").unwrap();
        let habits = db.list_habits().unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].name, "A");
        assert_eq!(habits[1].name, "B");
    }

    #[test]
    fn delete_removes_habit() {
        let db = Database::open_memory().unwrap();
        let habit = db.create_habit("A", "").unwrap();
        db.delete_habit(habit.id).unwrap();
        assert!(matches!(
            db.get_habit(habit.id),
            Err(DatabaseError::HabitNotFound(_))
        ));
        assert!(matches!(
            db.delete_habit(habit.id),
            Err(DatabaseError::HabitNotFound(_))
        ));
    }

    #[test]
    fn snapshot_save_and_load_round_trip() {
        let db = Database::open_memory().unwrap();
        let habit = db.create_habit("Run", "").unwrap();

        let snapshot = HabitSnapshot {
            tracking_data: vec![
                TrackingRecord {
                    date: "2024-01-15T00:00:00+00:00".to_string(),
                    is_completed: true,
                },
                TrackingRecord {
                    date: "2024-01-16T00:00:00+00:00".to_string(),
                    is_completed: false,
                },
            ],
            current_momentum: 0.07,
        };
        db.save(habit.id, &snapshot).unwrap();

        let loaded = db.load(habit.id).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn save_to_missing_habit_fails() {
        let db = Database::open_memory().unwrap();
        let result = db.save(42, &HabitSnapshot::empty());
        assert!(matches!(result, Err(DatabaseError::HabitNotFound(42))));
    }

    #[test]
    fn corrupt_tracking_data_is_reported() {
        let db = Database::open_memory().unwrap();
        let habit = db.create_habit("A", "").unwrap();
        db.conn
            .execute(
                "UPDATE habits SET tracking_data = 'not json' WHERE id = ?1",
                params![habit.id],
            )
            .unwrap();
        assert!(matches!(
            db.get_habit(habit.id),
            Err(DatabaseError::CorruptTrackingData { .. })
        ));
    }
}
