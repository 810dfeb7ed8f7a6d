//! Configuration management

use crate::core::{Error, ReadingField, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub peaks: PeakConfig,
    #[serde(default)]
    pub anomaly: AnomalyConfig,
    #[serde(default)]
    pub carbon: CarbonConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join("energy-analytics");

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, writing defaults if absent
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
            log::info!("Created default configuration at {}", path.display());
            return Ok(config);
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that all numeric settings are in range
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.peaks.percentile) {
            return Err(Error::InvalidParameter(format!(
                "peaks.percentile must be within [0, 100], got {}",
                self.peaks.percentile
            )));
        }
        if self.anomaly.window_size == 0 {
            return Err(Error::InvalidParameter(
                "anomaly.window_size must be at least 1".to_string(),
            ));
        }
        if !self.anomaly.deviation_threshold.is_finite() {
            return Err(Error::InvalidParameter(
                "anomaly.deviation_threshold must be finite".to_string(),
            ));
        }
        if let Some(factor) = self.carbon.emission_factor {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "carbon.emission_factor must be positive, got {}",
                    factor
                )));
            }
        }
        if self.forecast.horizon_days == 0 {
            return Err(Error::InvalidParameter(
                "forecast.horizon_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Language for report text: "auto", "en", "fr"
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String { "auto".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Daily aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Column summed per calendar date
    #[serde(default = "default_energy_field")]
    pub energy_field: ReadingField,
}

fn default_energy_field() -> ReadingField { ReadingField::EnergyConsumedKwh }
fn default_power_field() -> ReadingField { ReadingField::PowerKw }

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            energy_field: default_energy_field(),
        }
    }
}

/// Peak load settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakConfig {
    #[serde(default = "default_power_field")]
    pub power_field: ReadingField,
    /// Percentile (0-100) above which readings count as peak load
    #[serde(default = "default_percentile")]
    pub percentile: f64,
}

fn default_percentile() -> f64 { 75.0 }

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            power_field: default_power_field(),
            percentile: default_percentile(),
        }
    }
}

/// Spike detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyConfig {
    #[serde(default = "default_power_field")]
    pub power_field: ReadingField,
    /// Number of readings in the rolling mean
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Multiple of the deviation standard deviation that marks a spike
    #[serde(default = "default_deviation_threshold")]
    pub deviation_threshold: f64,
}

fn default_window_size() -> usize { 5 }
fn default_deviation_threshold() -> f64 { 2.0 }

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            power_field: default_power_field(),
            window_size: default_window_size(),
            deviation_threshold: default_deviation_threshold(),
        }
    }
}

/// Carbon accounting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonConfig {
    /// Grid region used to look up the emission factor
    #[serde(default = "default_region")]
    pub region: String,
    /// Explicit kg CO2/kWh, overrides the region lookup
    #[serde(default)]
    pub emission_factor: Option<f64>,
}

fn default_region() -> String { "US_Average".to_string() }

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            emission_factor: None,
        }
    }
}

/// Step between forecast points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastFrequency {
    Hourly,
    Daily,
}

impl ForecastFrequency {
    pub fn step(self) -> chrono::Duration {
        match self {
            ForecastFrequency::Hourly => chrono::Duration::hours(1),
            ForecastFrequency::Daily => chrono::Duration::days(1),
        }
    }
}

/// Forecasting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_frequency")]
    pub frequency: ForecastFrequency,
    /// Days covered by a forecast summary
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Fewest historical rows accepted for training
    #[serde(default = "default_min_training_rows")]
    pub min_training_rows: usize,
}

fn default_frequency() -> ForecastFrequency { ForecastFrequency::Hourly }
fn default_horizon_days() -> u32 { 7 }
fn default_min_training_rows() -> usize { 100 }

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            horizon_days: default_horizon_days(),
            min_training_rows: default_min_training_rows(),
        }
    }
}
