use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "momenta", version, about = "Momenta habit tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Mark days complete or incomplete
    Track {
        #[command(subcommand)]
        action: commands::track::TrackAction,
    },
    /// Render the momentum chart
    Chart {
        /// Habit ID
        id: i64,
        /// Emit chart data as JSON instead of rendering
        #[arg(long)]
        json: bool,
    },
    /// Show streak and current momentum
    Streak {
        /// Habit ID
        id: i64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Track { action } => commands::track::run(action),
        Commands::Chart { id, json } => commands::chart::run(id, json),
        Commands::Streak { id } => commands::streak::run(id),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
