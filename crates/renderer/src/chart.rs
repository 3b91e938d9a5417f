//! Line chart model for point time series.

use serde::Serialize;

/// Default x-axis tick limit.
pub const DEFAULT_MAX_TICKS: usize = 8;

/// Placeholder shown when a series has no values.
pub const NO_VALUE: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
    pub fill: bool,
}

/// A line chart keyed by timestamp labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub max_ticks: usize,
}

impl LineChart {
    /// Chart with one unfilled series.
    pub fn single_series(labels: Vec<String>, values: Vec<f64>, label: &str) -> Self {
        Self {
            labels,
            series: vec![ChartSeries {
                label: label.to_string(),
                values,
                fill: false,
            }],
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }

    /// Number of points of the first series.
    pub fn point_count(&self) -> usize {
        self.series.first().map(|s| s.values.len()).unwrap_or(0)
    }

    /// Evenly spaced x-axis labels, at most `max_ticks`, always starting
    /// with the first label.
    pub fn tick_labels(&self) -> Vec<(usize, &str)> {
        if self.labels.is_empty() || self.max_ticks == 0 {
            return Vec::new();
        }
        let step = ((self.labels.len() + self.max_ticks - 1) / self.max_ticks).max(1);
        self.labels
            .iter()
            .enumerate()
            .step_by(step)
            .map(|(i, l)| (i, l.as_str()))
            .collect()
    }

    /// Smallest and largest finite value across all series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// The last value with two decimals, or [`NO_VALUE`] when there is none.
pub fn format_last_value(values: &[f64]) -> String {
    match values.last() {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => NO_VALUE.to_string(),
    }
}
