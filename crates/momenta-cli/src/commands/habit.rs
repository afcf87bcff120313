//! Habit management commands.

use clap::Subcommand;
use momenta_core::storage::Database;

use super::print_json;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Habit description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List all habits
    List,
    /// Show a habit
    Show {
        /// Habit ID
        id: i64,
    },
    /// Delete a habit and all its tracking data
    Delete {
        /// Habit ID
        id: i64,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        HabitAction::Add { name, description } => {
            let habit = db.create_habit(&name, &description)?;
            print_json(&habit)?;
        }
        HabitAction::List => {
            let habits = db.list_habits()?;
            print_json(&habits)?;
        }
        HabitAction::Show { id } => {
            let habit = db.get_habit(id)?;
            print_json(&habit)?;
        }
        HabitAction::Delete { id } => {
            db.delete_habit(id)?;
            println!("deleted habit {id}");
        }
    }
    Ok(())
}
