//! Combined analysis report

use crate::analysis::{
    mean, sample_std_dev, AnomalyDetector, PeakAnalyzer, PeakSummary, TimeSeriesAggregator,
};
use crate::core::{Config, DailyAggregate, Error, Reading, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const ALL_MACHINES: &str = "All Machines";

/// Full analysis of one reading snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub machine_id: String,
    pub analysis_date: NaiveDateTime,
    pub data_points: usize,
    pub daily_consumption: DailyConsumptionSection,
    pub peak_load: PeakSummary,
    pub anomalies: AnomalySection,
    pub overall_statistics: OverallStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyConsumptionSection {
    pub total_days: usize,
    pub average_daily_kwh: f64,
    pub min_daily_kwh: f64,
    pub max_daily_kwh: f64,
    pub daily_data: Vec<DailyAggregate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalySection {
    pub anomaly_count: usize,
    pub anomaly_percentage: f64,
    pub anomalous_readings: Vec<AnomalousReading>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalousReading {
    pub timestamp: NaiveDateTime,
    pub power_kw: f64,
    pub rolling_avg: f64,
    pub deviation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStatistics {
    pub average_power_kw: f64,
    pub min_power_kw: f64,
    pub max_power_kw: f64,
    pub std_deviation_kw: f64,
    pub total_energy_kwh: f64,
}

impl AnalysisReport {
    /// Run daily, peak and anomaly analysis over the same readings
    ///
    /// `machine_id` only labels the report; filtering happens before the
    /// readings reach the engine.
    pub fn generate(readings: &[Reading], machine_id: Option<&str>, config: &Config) -> Result<Self> {
        if readings.is_empty() {
            return Err(Error::EmptyInput(
                "analysis report requires at least one reading".to_string(),
            ));
        }

        let daily = TimeSeriesAggregator::new(&config.aggregation).daily_totals(readings);
        let peak_load = PeakAnalyzer::new(&config.peaks).peak_summary(readings)?;
        let records = AnomalyDetector::new(&config.anomaly).detect(readings)?;

        let daily_values: Vec<f64> = daily.iter().map(|d| d.total_energy_kwh).collect();
        let anomalous_readings: Vec<AnomalousReading> = records
            .iter()
            .filter(|r| r.is_anomaly)
            .map(|r| AnomalousReading {
                timestamp: r.timestamp,
                power_kw: r.power_kw,
                rolling_avg: r.rolling_avg,
                deviation: r.deviation,
            })
            .collect();
        let anomaly_count = anomalous_readings.len();

        let power: Vec<f64> = readings.iter().map(|r| config.peaks.power_field.value(r)).collect();
        let total_energy_kwh: f64 = readings
            .iter()
            .map(|r| config.aggregation.energy_field.value(r))
            .sum();

        log::debug!(
            "Analysed {} readings over {} days, {} anomalies",
            readings.len(),
            daily.len(),
            anomaly_count
        );

        Ok(Self {
            machine_id: machine_id.unwrap_or(ALL_MACHINES).to_string(),
            analysis_date: chrono::Local::now().naive_local(),
            data_points: readings.len(),
            daily_consumption: DailyConsumptionSection {
                total_days: daily.len(),
                average_daily_kwh: mean(&daily_values),
                min_daily_kwh: daily_values.iter().copied().fold(f64::INFINITY, f64::min),
                max_daily_kwh: daily_values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                daily_data: daily,
            },
            peak_load,
            anomalies: AnomalySection {
                anomaly_count,
                anomaly_percentage: anomaly_count as f64 / readings.len() as f64 * 100.0,
                anomalous_readings,
            },
            overall_statistics: OverallStatistics {
                average_power_kw: mean(&power),
                min_power_kw: power.iter().copied().fold(f64::INFINITY, f64::min),
                max_power_kw: power.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                std_deviation_kw: sample_std_dev(&power),
                total_energy_kwh,
            },
        })
    }
}
