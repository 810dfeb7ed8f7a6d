//! Common types used across the engine

use crate::core::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single power/energy reading from an industrial machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Wall-clock time of the reading
    pub timestamp: NaiveDateTime,
    /// Instantaneous power draw in kW
    pub power_kw: f64,
    /// Energy consumed since the previous reading in kWh
    pub energy_consumed_kwh: f64,
    /// Machine the reading belongs to
    pub machine_id: String,
}

impl Reading {
    /// Create a validated reading
    pub fn new(
        timestamp: NaiveDateTime,
        power_kw: f64,
        energy_consumed_kwh: f64,
        machine_id: &str,
    ) -> Result<Self> {
        let reading = Self {
            timestamp,
            power_kw,
            energy_consumed_kwh,
            machine_id: machine_id.to_string(),
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Check the invariants a reading must hold once ingested
    pub fn validate(&self) -> Result<()> {
        if !self.power_kw.is_finite() || self.power_kw < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "power_kw must be a non-negative number, got {}",
                self.power_kw
            )));
        }
        if !self.energy_consumed_kwh.is_finite() || self.energy_consumed_kwh < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "energy_consumed_kwh must be a non-negative number, got {}",
                self.energy_consumed_kwh
            )));
        }
        Ok(())
    }
}

/// Numeric reading columns that analyses can be pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingField {
    PowerKw,
    EnergyConsumedKwh,
}

impl ReadingField {
    /// Read this field from a reading
    pub fn value(self, reading: &Reading) -> f64 {
        match self {
            ReadingField::PowerKw => reading.power_kw,
            ReadingField::EnergyConsumedKwh => reading.energy_consumed_kwh,
        }
    }

    /// Column name as it appears in serialized readings
    pub fn name(self) -> &'static str {
        match self {
            ReadingField::PowerKw => "power_kw",
            ReadingField::EnergyConsumedKwh => "energy_consumed_kwh",
        }
    }
}

/// Total energy for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total_energy_kwh: f64,
}

/// Parse a JSON array of readings, validating every record
pub fn parse_readings_json(content: &str) -> Result<Vec<Reading>> {
    let readings: Vec<Reading> = serde_json::from_str(content)
        .map_err(|e| Error::Serialization(format!("Failed to parse readings: {}", e)))?;

    for (index, reading) in readings.iter().enumerate() {
        reading.validate().map_err(|e| match e {
            Error::InvalidParameter(msg) => {
                Error::InvalidParameter(format!("reading {}: {}", index, msg))
            }
            other => other,
        })?;
    }

    Ok(readings)
}
