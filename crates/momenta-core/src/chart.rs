//! Chart data adapter.
//!
//! Maps a window and its momentum series into labeled datasets for a
//! line-chart consumer. Pure formatting, no computation.

use serde::{Deserialize, Serialize};

use crate::momentum::MomentumSeries;
use crate::window::DayWindow;

/// One named dataset of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<Option<f64>>,
}

/// Labels plus the three momentum datasets, aligned index for index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Short month/day labels, one per window slot ("Jan 5").
    pub labels: Vec<String>,
    /// Current, sustained, abandoned -- in that order.
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    pub fn from_series(window: &DayWindow, series: &MomentumSeries) -> Self {
        let labels = window
            .slots()
            .iter()
            .map(|slot| slot.date.format("%b %-d").to_string())
            .collect();
        Self {
            labels,
            series: vec![
                ChartSeries {
                    label: "Recorded".to_string(),
                    points: series.current.clone(),
                },
                ChartSeries {
                    label: "If sustained".to_string(),
                    points: series.sustained.clone(),
                },
                ChartSeries {
                    label: "If abandoned".to_string(),
                    points: series.abandoned.clone(),
                },
            ],
        }
    }
}
