//! Consumption analysis over a snapshot of readings
//!
//! Provides:
//! - Daily totals per calendar date
//! - Percentile-based peak load statistics
//! - Rolling-mean spike detection
//! - A combined report over all three

mod anomaly;
mod daily;
mod peaks;
mod report;

pub use anomaly::{AnomalyDetector, AnomalyRecord};
pub use daily::TimeSeriesAggregator;
pub use peaks::{PeakAnalyzer, PeakSummary};
pub use report::{AnalysisReport, AnomalySection, AnomalousReading, DailyConsumptionSection, OverallStatistics};

/// Arithmetic mean, 0 for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator), 0 below two values
pub(crate) fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mean = mean(values);
    let variance = values.iter()
        .map(|x| (x - mean).powi(2))
        .sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Percentile of an ascending slice with linear interpolation between ranks
///
/// `pct` is in [0, 100]; `sorted` must be non-empty.
pub(crate) fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    let lower = sorted[lower_index];
    let upper = sorted[upper_index];
    let fraction = rank - lower_index as f64;

    (lower + (upper - lower) * fraction).clamp(lower, upper)
}
