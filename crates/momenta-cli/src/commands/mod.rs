pub mod chart;
pub mod config;
pub mod habit;
pub mod streak;
pub mod track;

use serde::Serialize;

/// Print a value as JSON, pretty or compact per config.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = momenta_core::Config::load_or_default();
    let out = if cfg.output.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

/// Today as a civil calendar day in the local timezone.
pub fn local_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
