//! Spike detection against a backward-looking rolling mean
//!
//! Only positive excursions above the local trend are flagged. Dips
//! (shutdowns, sensor dropouts) are reported through their negative
//! deviation but never marked as anomalies.

use crate::analysis::sample_std_dev;
use crate::core::{AnomalyConfig, Error, Reading, ReadingField, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Rolling statistics for a single reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Position of the reading in the input
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub machine_id: String,
    /// Value of the analysed power column
    pub power_kw: f64,
    pub rolling_avg: f64,
    /// `power_kw - rolling_avg`
    pub deviation: f64,
    pub is_anomaly: bool,
}

/// Rolling-mean spike detector
pub struct AnomalyDetector {
    power_field: ReadingField,
    window_size: usize,
    deviation_threshold: f64,
}

impl AnomalyDetector {
    /// Create a detector from configuration
    pub fn new(config: &AnomalyConfig) -> Self {
        Self {
            power_field: config.power_field,
            window_size: config.window_size,
            deviation_threshold: config.deviation_threshold,
        }
    }

    /// Create a detector on `power_kw` with explicit parameters
    pub fn with_params(window_size: usize, deviation_threshold: f64) -> Self {
        Self {
            power_field: ReadingField::PowerKw,
            window_size,
            deviation_threshold,
        }
    }

    /// Produce one record per reading, in input order
    pub fn detect(&self, readings: &[Reading]) -> Result<Vec<AnomalyRecord>> {
        if self.window_size == 0 {
            return Err(Error::InvalidParameter(
                "window_size must be at least 1".to_string(),
            ));
        }
        if !self.deviation_threshold.is_finite() {
            return Err(Error::InvalidParameter(
                "deviation_threshold must be finite".to_string(),
            ));
        }

        let power: Vec<f64> = readings.iter().map(|r| self.power_field.value(r)).collect();
        let (rolling, deviations) = rolling_deviation(&power, self.window_size);

        // One global spread for the whole series; zero when it cannot be estimated
        let limit = self.deviation_threshold * sample_std_dev(&deviations);

        let records = readings
            .iter()
            .enumerate()
            .map(|(index, reading)| AnomalyRecord {
                index,
                timestamp: reading.timestamp,
                machine_id: reading.machine_id.clone(),
                power_kw: power[index],
                rolling_avg: rolling[index],
                deviation: deviations[index],
                is_anomaly: deviations[index] > limit,
            })
            .collect();

        Ok(records)
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(&AnomalyConfig::default())
    }
}

/// Rolling mean over the current value and up to `window - 1` preceding values,
/// returned together with each value's deviation from it.
///
/// Window sums are taken relative to the current value, so a window of
/// identical values has a deviation of exactly zero.
fn rolling_deviation(values: &[f64], window: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rolling = Vec::with_capacity(values.len());
    let mut deviations = Vec::with_capacity(values.len());

    for (i, &current) in values.iter().enumerate() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        let offset = slice.iter().map(|v| v - current).sum::<f64>() / slice.len() as f64;

        rolling.push(current + offset);
        deviations.push(-offset);
    }

    (rolling, deviations)
}
