//! Daily consumption totals

use crate::core::{AggregationConfig, DailyAggregate, Reading, ReadingField};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Groups readings by calendar date and sums an energy column
pub struct TimeSeriesAggregator {
    energy_field: ReadingField,
}

impl TimeSeriesAggregator {
    /// Create an aggregator from configuration
    pub fn new(config: &AggregationConfig) -> Self {
        Self::with_field(config.energy_field)
    }

    /// Create an aggregator summing the given column
    pub fn with_field(energy_field: ReadingField) -> Self {
        Self { energy_field }
    }

    /// Sum the energy column per calendar date, ordered by ascending date
    ///
    /// Empty input yields an empty sequence.
    pub fn daily_totals(&self, readings: &[Reading]) -> Vec<DailyAggregate> {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for reading in readings {
            *totals.entry(reading.timestamp.date()).or_insert(0.0) +=
                self.energy_field.value(reading);
        }

        totals
            .into_iter()
            .map(|(date, total_energy_kwh)| DailyAggregate {
                date,
                total_energy_kwh,
            })
            .collect()
    }
}

impl Default for TimeSeriesAggregator {
    fn default() -> Self {
        Self::new(&AggregationConfig::default())
    }
}
