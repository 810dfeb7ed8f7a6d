//! Core module - Configuration, errors, and record types

mod config;
mod error;
mod types;

pub use config::{Config, GeneralConfig, AggregationConfig, PeakConfig, AnomalyConfig, CarbonConfig, ForecastConfig, ForecastFrequency};
pub use error::{Error, Result};
pub use types::{Reading, ReadingField, DailyAggregate, parse_readings_json};
