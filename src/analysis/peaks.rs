//! Peak load identification

use crate::analysis::{mean, percentile};
use crate::core::{Error, PeakConfig, Reading, ReadingField, Result};
use serde::{Deserialize, Serialize};

/// Statistics of the readings at or above a percentile threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakSummary {
    /// Requested percentile (0-100)
    pub percentile: f64,
    /// Power level at the requested percentile
    pub threshold: f64,
    /// Readings with power >= threshold
    pub count_at_or_above: usize,
    /// Share of all readings at or above the threshold, in percent
    pub percentage_at_or_above: f64,
    pub total_count: usize,
    pub min_peak_power: f64,
    pub max_peak_power: f64,
    pub average_peak_power: f64,
}

/// Percentile-based peak analysis
pub struct PeakAnalyzer {
    power_field: ReadingField,
    percentile: f64,
}

impl PeakAnalyzer {
    /// Create an analyzer from configuration
    pub fn new(config: &PeakConfig) -> Self {
        Self {
            power_field: config.power_field,
            percentile: config.percentile,
        }
    }

    /// Use a different percentile, keeping the configured field
    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = percentile;
        self
    }

    /// Compute the threshold and peak statistics
    pub fn peak_summary(&self, readings: &[Reading]) -> Result<PeakSummary> {
        if !(0.0..=100.0).contains(&self.percentile) {
            return Err(Error::InvalidParameter(format!(
                "percentile must be within [0, 100], got {}",
                self.percentile
            )));
        }
        if readings.is_empty() {
            return Err(Error::EmptyInput(
                "peak analysis requires at least one reading".to_string(),
            ));
        }

        let power: Vec<f64> = readings.iter().map(|r| self.power_field.value(r)).collect();

        let mut sorted = power.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let threshold = percentile(&sorted, self.percentile);

        let peaks: Vec<f64> = power.into_iter().filter(|&p| p >= threshold).collect();
        let count = peaks.len();

        Ok(PeakSummary {
            percentile: self.percentile,
            threshold,
            count_at_or_above: count,
            percentage_at_or_above: count as f64 / readings.len() as f64 * 100.0,
            total_count: readings.len(),
            min_peak_power: peaks.iter().copied().fold(f64::INFINITY, f64::min),
            max_peak_power: peaks.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            average_peak_power: mean(&peaks),
        })
    }
}

impl Default for PeakAnalyzer {
    fn default() -> Self {
        Self::new(&PeakConfig::default())
    }
}
