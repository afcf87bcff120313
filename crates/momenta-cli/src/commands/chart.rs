//! Momentum chart rendering.

use momenta_core::storage::Database;
use momenta_core::{ChartData, Config, HabitTracker, MomentumSeries};

use super::{local_today, print_json};

pub fn run(id: i64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let habit = db.get_habit(id)?;
    let tracker = HabitTracker::new(local_today(), &habit.snapshot());

    if json {
        print_json(&tracker.chart_data())?;
        return Ok(());
    }

    let cfg = Config::load_or_default();
    print!(
        "{}",
        render_ascii_chart(
            &habit.name,
            &tracker.chart_data(),
            tracker.series(),
            cfg.chart.width as usize,
        )
    );
    Ok(())
}

/// Render the three momentum series as an ASCII chart, one row per day.
///
/// Past and present days draw the recorded trajectory as solid bars; future
/// days draw the sustained projection as shaded bars with the abandoned
/// value appended after a slash.
fn render_ascii_chart(
    name: &str,
    chart: &ChartData,
    series: &MomentumSeries,
    width: usize,
) -> String {
    let ceiling = 15.0;
    let mut output = format!("\n{} Momentum (streak {}):\n", name, series.streak);
    output.push_str(&"─".repeat(width + 16));
    output.push('\n');

    for (i, label) in chart.labels.iter().enumerate() {
        let (value, projected) = match series.current[i] {
            Some(v) => (v, false),
            None => (series.sustained[i].unwrap_or(0.0), true),
        };
        let bar_length = ((value / ceiling) * width as f64).round() as usize;
        let bar_length = bar_length.min(width);
        let glyph = if projected { "░" } else { "█" };
        let bar = glyph.repeat(bar_length);
        let empty = " ".repeat(width - bar_length);

        let tail = if projected {
            let abandoned = series.abandoned[i].unwrap_or(0.0);
            format!("{value:.2} / {abandoned:.2}")
        } else {
            format!("{value:.2}")
        };
        output.push_str(&format!("{label:>6} {bar}{empty} {tail}\n"));
    }

    output.push_str(&"─".repeat(width + 16));
    output.push_str("\n█ recorded  ░ if sustained (value after / : if abandoned)\n");
    output
}
