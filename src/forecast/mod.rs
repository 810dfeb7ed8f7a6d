//! Consumption forecasting
//!
//! [`fit`] and the [`ForecastModel`] methods are pure. [`ConsumptionForecaster`]
//! is the handle a service shares between callers: training builds a new
//! model and publishes it in one atomic swap, predictions run against
//! whichever model was current when they started.

mod model;
mod regression;
mod summary;

pub use model::{
    fit, FeatureContribution, FeatureWeight, ForecastModel, ForecastPoint, ModelExplanation,
    Prediction, TrainingMetrics,
};
pub use summary::{ForecastDay, ForecastSummary};

use crate::core::{Error, ForecastFrequency, Reading, Result};
use crate::features::FEATURE_NAMES;
use arc_swap::ArcSwapOption;
use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;
use std::sync::Arc;

const MODEL_TYPE: &str = "Linear Regression";
const EXAMPLE_HOUR: u32 = 14;

/// Trained state reported to callers
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub is_trained: bool,
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub trained_rows: usize,
}

/// Shared train/predict handle
#[derive(Default)]
pub struct ConsumptionForecaster {
    model: ArcSwapOption<ForecastModel>,
}

impl ConsumptionForecaster {
    /// Create an untrained forecaster
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit on `(timestamp, energy_kwh)` history and publish the model
    pub fn train(&self, history: &[(NaiveDateTime, f64)]) -> Result<TrainingMetrics> {
        let (model, metrics) = fit(history)?;
        self.model.store(Some(Arc::new(model)));

        log::info!(
            "Model trained on {} rows: R2 = {:.4}, MAE = {:.2} kWh, RMSE = {:.2} kWh",
            metrics.training_rows,
            metrics.r2_score,
            metrics.mae,
            metrics.rmse
        );
        for weight in &metrics.coefficients {
            log::debug!("  {}: {:+.4}", weight.feature, weight.coefficient);
        }
        log::debug!("  intercept: {:.4}", metrics.intercept);

        Ok(metrics)
    }

    /// Like [`train`](Self::train) but refuses histories shorter than `min_rows`
    pub fn train_with_minimum(
        &self,
        history: &[(NaiveDateTime, f64)],
        min_rows: usize,
    ) -> Result<TrainingMetrics> {
        if history.len() < min_rows {
            log::warn!(
                "Refusing to train on {} rows, at least {} required",
                history.len(),
                min_rows
            );
            return Err(Error::EmptyInput(format!(
                "Insufficient training data: {} rows, need at least {}",
                history.len(),
                min_rows
            )));
        }
        self.train(history)
    }

    /// Train on the energy column of validated readings
    pub fn train_on_readings(&self, readings: &[Reading], min_rows: usize) -> Result<TrainingMetrics> {
        let history: Vec<(NaiveDateTime, f64)> = readings
            .iter()
            .map(|r| (r.timestamp, r.energy_consumed_kwh))
            .collect();
        self.train_with_minimum(&history, min_rows)
    }

    /// Current model, if trained
    pub fn snapshot(&self) -> Option<Arc<ForecastModel>> {
        self.model.load_full()
    }

    fn trained(&self) -> Result<Arc<ForecastModel>> {
        self.snapshot().ok_or(Error::NotTrained)
    }

    pub fn is_trained(&self) -> bool {
        self.model.load().is_some()
    }

    pub fn status(&self) -> ModelStatus {
        let model = self.snapshot();
        ModelStatus {
            is_trained: model.is_some(),
            model_type: MODEL_TYPE.to_string(),
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            trained_rows: model.map(|m| m.trained_rows()).unwrap_or(0),
        }
    }

    pub fn predict(&self, timestamp: NaiveDateTime) -> Result<Prediction> {
        Ok(self.trained()?.predict(timestamp))
    }

    pub fn predict_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        step: Duration,
    ) -> Result<Vec<ForecastPoint>> {
        self.trained()?.predict_range(start, end, step)
    }

    /// Forecast `days` whole days from `start` and roll them up per day
    ///
    /// The range ends one step before `start + days`, so a midnight start
    /// yields exactly `days` calendar dates.
    pub fn forecast_next_days(
        &self,
        start: NaiveDateTime,
        days: u32,
        frequency: ForecastFrequency,
    ) -> Result<ForecastSummary> {
        let model = self.trained()?;
        if days == 0 {
            return Err(Error::InvalidParameter(
                "Forecast horizon must be at least one day".to_string(),
            ));
        }

        let step = frequency.step();
        let end = start
            .checked_add_signed(Duration::days(i64::from(days)))
            .and_then(|t| t.checked_sub_signed(step))
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "Forecast of {} days from {} runs past the last supported date",
                    days, start
                ))
            })?;
        let points = model.predict_range(start, end, step)?;
        log::debug!("Forecast {} points over {} days from {}", points.len(), days, start);

        Ok(ForecastSummary::from_points(&points))
    }

    /// Explain the prediction for today at 14:00 local time
    pub fn explain(&self) -> Result<ModelExplanation> {
        let example = Local::now()
            .date_naive()
            .and_hms_opt(EXAMPLE_HOUR, 0, 0)
            .ok_or_else(|| Error::InvalidParameter("Invalid example time".to_string()))?;
        self.explain_at(example)
    }

    pub fn explain_at(&self, timestamp: NaiveDateTime) -> Result<ModelExplanation> {
        Ok(self.trained()?.explain_at(timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{generate_readings, start_of};

    fn constant_history(kwh: f64, hours: i64) -> Vec<(NaiveDateTime, f64)> {
        let start = start_of("2026-01-01 00:00");
        (0..hours).map(|i| (start + Duration::hours(i), kwh)).collect()
    }

    #[test]
    fn test_untrained_forecaster_refuses_queries() {
        let forecaster = ConsumptionForecaster::new();
        let ts = start_of("2026-03-18 14:00");

        assert!(!forecaster.is_trained());
        assert!(matches!(forecaster.predict(ts), Err(Error::NotTrained)));
        assert!(matches!(
            forecaster.predict_range(ts, ts, Duration::hours(1)),
            Err(Error::NotTrained)
        ));
        assert!(matches!(forecaster.explain(), Err(Error::NotTrained)));
        assert!(matches!(
            forecaster.forecast_next_days(ts, 7, ForecastFrequency::Hourly),
            Err(Error::NotTrained)
        ));

        let status = forecaster.status();
        assert!(!status.is_trained);
        assert_eq!(status.model_type, "Linear Regression");
        assert_eq!(status.feature_names.len(), 6);
        assert_eq!(status.trained_rows, 0);
    }

    #[test]
    fn test_empty_training_keeps_previous_model() {
        let forecaster = ConsumptionForecaster::new();
        assert!(matches!(forecaster.train(&[]), Err(Error::EmptyInput(_))));
        assert!(!forecaster.is_trained());

        forecaster.train(&constant_history(10.0, 48)).unwrap();
        assert!(forecaster.train(&[]).is_err());
        let p = forecaster.predict(start_of("2026-05-01 09:00")).unwrap();
        assert_eq!(p.predicted_energy_kwh, 10.0);
    }

    #[test]
    fn test_train_with_minimum() {
        let forecaster = ConsumptionForecaster::new();
        let history = constant_history(10.0, 50);

        assert!(matches!(
            forecaster.train_with_minimum(&history, 100),
            Err(Error::EmptyInput(_))
        ));
        assert!(!forecaster.is_trained());

        let metrics = forecaster.train_with_minimum(&history, 50).unwrap();
        assert_eq!(metrics.training_rows, 50);
        assert_eq!(metrics.r2_score, 1.0);
        assert_eq!(forecaster.status().trained_rows, 50);
    }

    #[test]
    fn test_train_on_sample_readings() {
        let readings = generate_readings(start_of("2026-01-01 00:00"), 24 * 60, 7);
        let forecaster = ConsumptionForecaster::new();
        let metrics = forecaster.train_on_readings(&readings, 100).unwrap();

        assert!(metrics.r2_score > 0.0 && metrics.r2_score <= 1.0);
        assert!(metrics.mae > 0.0);
        assert!(metrics.rmse >= metrics.mae);

        let points = forecaster
            .predict_range(
                start_of("2027-06-01 00:00"),
                start_of("2027-06-30 23:00"),
                Duration::hours(1),
            )
            .unwrap();
        assert_eq!(points.len(), 30 * 24);
        assert!(points.iter().all(|p| p.predicted_energy_kwh >= 0.0));
    }

    #[test]
    fn test_forecast_next_days() {
        let forecaster = ConsumptionForecaster::new();
        forecaster.train(&constant_history(10.0, 48)).unwrap();
        let start = start_of("2026-03-02 00:00");

        let hourly = forecaster
            .forecast_next_days(start, 2, ForecastFrequency::Hourly)
            .unwrap();
        assert_eq!(hourly.daily_summary.len(), 2);
        assert_eq!(hourly.daily_summary[0].hourly_count, 24);
        assert_eq!(hourly.daily_summary[0].total_kwh, 240.0);
        assert_eq!(hourly.total_forecast_kwh, 480.0);
        assert_eq!(hourly.average_daily_kwh, 240.0);
        assert_eq!(hourly.daily_summary[1].day_name, "Tuesday");

        let daily = forecaster
            .forecast_next_days(start, 7, ForecastFrequency::Daily)
            .unwrap();
        assert_eq!(daily.daily_summary.len(), 7);
        assert!(daily.daily_summary.iter().all(|d| d.hourly_count == 1));

        assert!(matches!(
            forecaster.forecast_next_days(start, 0, ForecastFrequency::Hourly),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_forecast_horizon_past_last_date_is_rejected() {
        let forecaster = ConsumptionForecaster::new();
        forecaster.train(&constant_history(10.0, 48)).unwrap();

        assert!(matches!(
            forecaster.forecast_next_days(start_of("2026-01-01 00:00"), u32::MAX, ForecastFrequency::Daily),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            forecaster.forecast_next_days(NaiveDateTime::MAX, 1, ForecastFrequency::Hourly),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_retraining_swaps_model() {
        let forecaster = ConsumptionForecaster::new();
        forecaster.train(&constant_history(10.0, 48)).unwrap();
        let before = forecaster.snapshot().unwrap();

        forecaster.train(&constant_history(20.0, 72)).unwrap();
        let ts = start_of("2026-04-01 12:00");

        // Snapshots taken earlier keep answering from the old weights
        assert_eq!(before.predict(ts).predicted_energy_kwh, 10.0);
        assert_eq!(forecaster.predict(ts).unwrap().predicted_energy_kwh, 20.0);
        assert_eq!(forecaster.status().trained_rows, 72);
    }

    #[test]
    fn test_concurrent_predictions_see_whole_models() {
        let forecaster = Arc::new(ConsumptionForecaster::new());
        forecaster.train(&constant_history(10.0, 48)).unwrap();
        let low = constant_history(10.0, 48);
        let high = constant_history(20.0, 48);
        let ts = start_of("2026-04-01 12:00");

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let forecaster = Arc::clone(&forecaster);
                scope.spawn(move || {
                    for _ in 0..500 {
                        let p = forecaster.predict(ts).unwrap().predicted_energy_kwh;
                        assert!(p == 10.0 || p == 20.0, "torn prediction {}", p);
                    }
                });
            }
            scope.spawn(|| {
                for i in 0..50 {
                    let history = if i % 2 == 0 { &high } else { &low };
                    forecaster.train(history).unwrap();
                }
            });
        });

        assert!(forecaster.is_trained());
    }

    #[test]
    fn test_explain_uses_two_pm() {
        let forecaster = ConsumptionForecaster::new();
        forecaster.train(&constant_history(12.0, 48)).unwrap();

        let explanation = forecaster.explain().unwrap();
        assert_eq!(explanation.example_timestamp.time(), chrono::NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(explanation.predicted_energy_kwh, 12.0);
    }
}
