//! Fitted consumption model and the pure operations on it

use super::regression::{self, LinearFit};
use crate::core::{Error, Result};
use crate::features::{TimeFeatures, FEATURE_COUNT, FEATURE_NAMES};
use crate::i18n::I18n;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// A trained linear model over the six time features
///
/// Only produced by [`fit`]; immutable afterwards. `trained` is always true
/// on a value of this type and is kept so serialized models say so.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    feature_names: Vec<String>,
    trained: bool,
    trained_rows: usize,
}

/// Fit quality on the training set
#[derive(Debug, Clone, Serialize)]
pub struct TrainingMetrics {
    pub r2_score: f64,
    pub mae: f64,
    pub rmse: f64,
    pub coefficients: Vec<FeatureWeight>,
    pub intercept: f64,
    pub training_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureWeight {
    pub feature: String,
    pub coefficient: f64,
}

/// A single prediction with the features that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub timestamp: NaiveDateTime,
    pub predicted_energy_kwh: f64,
    pub features: TimeFeatures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub predicted_energy_kwh: f64,
}

/// Fit a model on `(timestamp, energy_kwh)` history
pub fn fit(history: &[(NaiveDateTime, f64)]) -> Result<(ForecastModel, TrainingMetrics)> {
    if history.is_empty() {
        return Err(Error::EmptyInput(
            "No historical data to train on".to_string(),
        ));
    }
    if let Some((timestamp, energy)) = history.iter().find(|(_, e)| !e.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "Energy at {} is not a finite number: {}",
            timestamp, energy
        )));
    }

    let rows: Vec<[f64; FEATURE_COUNT]> = history
        .iter()
        .map(|(timestamp, _)| TimeFeatures::from_timestamp(timestamp).to_vector())
        .collect();
    let targets: Vec<f64> = history.iter().map(|(_, energy)| *energy).collect();

    let LinearFit {
        coefficients,
        intercept,
    } = regression::fit(&rows, &targets);

    let model = ForecastModel {
        coefficients,
        intercept,
        feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
        trained: true,
        trained_rows: history.len(),
    };

    // Metrics are on the raw linear output, before the non-negative clamp
    let fitted: Vec<f64> = rows.iter().map(|row| model.linear_output(row)).collect();
    let metrics = TrainingMetrics {
        r2_score: regression::r2_score(&targets, &fitted),
        mae: regression::mean_absolute_error(&targets, &fitted),
        rmse: regression::root_mean_squared_error(&targets, &fitted),
        coefficients: model.weights(),
        intercept,
        training_rows: history.len(),
    };

    Ok((model, metrics))
}

impl ForecastModel {
    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn trained_rows(&self) -> usize {
        self.trained_rows
    }

    pub fn weights(&self) -> Vec<FeatureWeight> {
        self.feature_names
            .iter()
            .zip(self.coefficients.iter())
            .map(|(feature, &coefficient)| FeatureWeight {
                feature: feature.clone(),
                coefficient,
            })
            .collect()
    }

    fn linear_output(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        regression::evaluate(&self.coefficients, self.intercept, row)
    }

    /// Predicted energy at `timestamp`, never negative
    pub fn predict(&self, timestamp: NaiveDateTime) -> Prediction {
        let features = TimeFeatures::from_timestamp(&timestamp);
        Prediction {
            timestamp,
            predicted_energy_kwh: self.linear_output(&features.to_vector()).max(0.0),
            features,
        }
    }

    /// Predictions from `start` to `end` inclusive, every `step`
    ///
    /// Stops early if the next step would pass the last representable instant.
    pub fn predict_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        step: Duration,
    ) -> Result<Vec<ForecastPoint>> {
        if step <= Duration::zero() {
            return Err(Error::InvalidParameter(format!(
                "Forecast step must be positive, got {} seconds",
                step.num_seconds()
            )));
        }
        if end < start {
            return Err(Error::InvalidParameter(format!(
                "Forecast end {} is before start {}",
                end, start
            )));
        }

        let mut points = Vec::new();
        let mut next = Some(start);
        while let Some(timestamp) = next.filter(|t| *t <= end) {
            let prediction = self.predict(timestamp);
            points.push(ForecastPoint {
                timestamp,
                predicted_energy_kwh: prediction.predicted_energy_kwh,
            });
            next = timestamp.checked_add_signed(step);
        }
        Ok(points)
    }

    /// Break the prediction at `timestamp` into base plus per-feature terms
    pub fn explain_at(&self, timestamp: NaiveDateTime) -> ModelExplanation {
        let prediction = self.predict(timestamp);
        let values = prediction.features.to_vector();
        let raw_energy_kwh = self.linear_output(&values);

        let contributions = self
            .feature_names
            .iter()
            .zip(self.coefficients.iter())
            .zip(values.iter())
            .map(|((feature, &coefficient), &value)| FeatureContribution {
                feature: feature.clone(),
                value,
                coefficient,
                contribution: value * coefficient,
            })
            .collect();

        ModelExplanation {
            example_timestamp: timestamp,
            predicted_energy_kwh: prediction.predicted_energy_kwh,
            raw_energy_kwh,
            intercept: self.intercept,
            contributions,
        }
    }
}

/// Decomposition of one example prediction
///
/// `intercept + Σ contribution == raw_energy_kwh`; the prediction is that
/// value clamped at zero.
#[derive(Debug, Clone, Serialize)]
pub struct ModelExplanation {
    pub example_timestamp: NaiveDateTime,
    pub predicted_energy_kwh: f64,
    pub raw_energy_kwh: f64,
    pub intercept: f64,
    pub contributions: Vec<FeatureContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub value: f64,
    pub coefficient: f64,
    pub contribution: f64,
}

const RULE_WIDTH: usize = 70;

impl ModelExplanation {
    /// Render the explanation in the language of `i18n`
    pub fn render(&self, i18n: &I18n) -> String {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let coefficient_of = |name: &str| {
            self.contributions
                .iter()
                .find(|c| c.feature == name)
                .map(|c| c.coefficient)
                .unwrap_or(0.0)
        };

        let mut lines = vec![
            heavy.clone(),
            i18n.get("explain.title"),
            heavy.clone(),
            String::new(),
            i18n.format(
                "explain.formula",
                &[
                    ("hour", format!("{:+.4}", coefficient_of("hour"))),
                    ("day_of_week", format!("{:+.4}", coefficient_of("day_of_week"))),
                ],
            ),
            String::new(),
            i18n.get("explain.interpretation"),
            light,
        ];

        for c in &self.contributions {
            let direction = if c.coefficient > 0.0 {
                i18n.get("explain.increases")
            } else {
                i18n.get("explain.decreases")
            };
            lines.push(i18n.format(
                "explain.feature_effect",
                &[
                    ("feature", c.feature.clone()),
                    ("direction", direction),
                    ("impact", format!("{:.4}", c.coefficient.abs())),
                ],
            ));
        }

        lines.push(String::new());
        lines.push(i18n.format(
            "explain.base",
            &[("intercept", format!("{:.2}", self.intercept))],
        ));
        lines.push(i18n.get("explain.base_note"));
        lines.push(String::new());
        lines.push(heavy.clone());
        lines.push(i18n.get("explain.example_title"));
        lines.push(heavy.clone());
        lines.push(i18n.format(
            "explain.time",
            &[("time", self.example_timestamp.format("%A, %I:%M %p").to_string())],
        ));
        lines.push(i18n.format(
            "explain.predicted",
            &[("energy", format!("{:.2}", self.predicted_energy_kwh))],
        ));
        lines.push(i18n.get("explain.calculated_as"));
        lines.push(i18n.format(
            "explain.base_line",
            &[("intercept", format!("{:.2}", self.intercept))],
        ));

        for c in &self.contributions {
            lines.push(i18n.format(
                "explain.contribution",
                &[
                    ("feature", c.feature.clone()),
                    ("value", c.value.to_string()),
                    ("coefficient", format!("{:.4}", c.coefficient)),
                    ("contribution", format!("{:.2}", c.contribution)),
                ],
            ));
        }
        if self.raw_energy_kwh < 0.0 {
            lines.push(i18n.format(
                "explain.clamped",
                &[("raw", format!("{:.2}", self.raw_energy_kwh))],
            ));
        }
        lines.push(heavy);

        lines.join("\n")
    }
}

impl fmt::Display for ModelExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&I18n::new("en")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::start_of;
    use chrono::{Datelike, Timelike};

    /// Energy as an exact linear function of the time features
    fn linear_history(start: &str, hours: i64) -> Vec<(NaiveDateTime, f64)> {
        let start = start_of(start);
        (0..hours)
            .map(|i| {
                let ts = start + Duration::hours(i);
                let f = TimeFeatures::from_timestamp(&ts);
                let energy = 10.0
                    + 0.5 * f64::from(f.hour)
                    + 0.25 * f64::from(f.day_of_week)
                    + 0.05 * f64::from(f.day_of_month)
                    + 1.0 * f64::from(f.month)
                    + 3.0 * f64::from(f.is_weekend)
                    + 8.0 * f64::from(f.is_business_hour);
                (ts, energy)
            })
            .collect()
    }

    #[test]
    fn test_fit_recovers_linear_generator() {
        let history = linear_history("2026-01-05 00:00", 60 * 24);
        let (model, metrics) = fit(&history).unwrap();

        assert!(metrics.r2_score > 1.0 - 1e-9, "r2 = {}", metrics.r2_score);
        assert!(metrics.mae < 1e-6);
        assert!(metrics.rmse < 1e-6);
        assert_eq!(metrics.training_rows, 60 * 24);

        let expected = [0.5, 0.25, 0.05, 1.0, 3.0, 8.0];
        for (c, e) in model.coefficients().iter().zip(expected.iter()) {
            assert!((c - e).abs() < 1e-6, "coefficient {} vs {}", c, e);
        }
        assert!((model.intercept() - 10.0).abs() < 1e-5);
        assert_eq!(metrics.coefficients[5].feature, "is_business_hour");
    }

    #[test]
    fn test_fit_rejects_empty_and_non_finite() {
        assert!(matches!(fit(&[]), Err(Error::EmptyInput(_))));

        let history = vec![(start_of("2026-01-01 00:00"), f64::NAN)];
        assert!(matches!(fit(&history), Err(Error::InvalidParameter(_))));
    }

    /// Falls by 6 kWh per month, reaching zero in October
    fn declining_history() -> Vec<(NaiveDateTime, f64)> {
        let start = start_of("2026-01-01 00:00");
        (0..(304 * 4))
            .map(|i| {
                let ts = start + Duration::hours(6 * i);
                (ts, 60.0 - 6.0 * f64::from(ts.month()))
            })
            .collect()
    }

    #[test]
    fn test_predictions_are_clamped_out_of_sample() {
        let (model, _) = fit(&declining_history()).unwrap();

        let march = model.predict(start_of("2026-03-10 12:00"));
        assert!((march.predicted_energy_kwh - 42.0).abs() < 1e-6);

        for ts in ["2026-12-15 12:00", "2099-12-31 23:00", "1970-11-01 00:00"] {
            let p = model.predict(start_of(ts));
            assert_eq!(p.predicted_energy_kwh, 0.0, "at {}", ts);
        }
    }

    #[test]
    fn test_prediction_carries_features() {
        let (model, _) = fit(&linear_history("2026-01-05 00:00", 24 * 30)).unwrap();
        let p = model.predict(start_of("2026-03-18 14:00"));
        assert_eq!(p.features.hour, 14);
        assert_eq!(p.features.day_of_week, 2);
        assert_eq!(p.features.is_business_hour, 1);
        assert_eq!(p.timestamp.hour(), 14);
    }

    #[test]
    fn test_predict_range_inclusive() {
        let (model, _) = fit(&linear_history("2026-01-05 00:00", 24 * 30)).unwrap();
        let start = start_of("2026-02-01 00:00");

        let hourly = model
            .predict_range(start, start + Duration::hours(23), Duration::hours(1))
            .unwrap();
        assert_eq!(hourly.len(), 24);
        assert!(hourly.windows(2).all(|w| w[0].timestamp < w[1].timestamp));

        let single = model.predict_range(start, start, Duration::hours(1)).unwrap();
        assert_eq!(single.len(), 1);

        let daily = model
            .predict_range(start, start + Duration::days(6), Duration::days(1))
            .unwrap();
        assert_eq!(daily.len(), 7);
        assert_eq!(daily[6].timestamp, start_of("2026-02-07 00:00"));
    }

    #[test]
    fn test_predict_range_rejects_bad_parameters() {
        let (model, _) = fit(&linear_history("2026-01-05 00:00", 48)).unwrap();
        let start = start_of("2026-02-01 00:00");

        assert!(matches!(
            model.predict_range(start, start - Duration::hours(1), Duration::hours(1)),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            model.predict_range(start, start + Duration::hours(3), Duration::zero()),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            model.predict_range(start, start + Duration::hours(3), Duration::hours(-1)),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_predict_range_stops_at_last_representable_instant() {
        let (model, _) = fit(&linear_history("2026-01-05 00:00", 48)).unwrap();
        let start = NaiveDateTime::MAX - Duration::hours(1);

        let points = model
            .predict_range(start, NaiveDateTime::MAX, Duration::hours(1))
            .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].timestamp, NaiveDateTime::MAX);

        let daily = model
            .predict_range(start, NaiveDateTime::MAX, Duration::days(1))
            .unwrap();
        assert_eq!(daily.len(), 1);
    }

    #[test]
    fn test_serialized_model_reports_trained() {
        let (model, _) = fit(&linear_history("2026-01-05 00:00", 48)).unwrap();
        assert!(model.is_trained());

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["trained"], serde_json::Value::Bool(true));
        assert_eq!(json["trained_rows"], serde_json::json!(48));
        assert_eq!(json["feature_names"][0], "hour");
    }

    #[test]
    fn test_clamped_explanation_shows_raw_value() {
        let (model, _) = fit(&declining_history()).unwrap();
        let explanation = model.explain_at(start_of("2026-12-15 12:00"));

        assert_eq!(explanation.predicted_energy_kwh, 0.0);
        assert!((explanation.raw_energy_kwh + 12.0).abs() < 1e-6);
        let total: f64 = explanation.intercept
            + explanation.contributions.iter().map(|c| c.contribution).sum::<f64>();
        assert!((total - explanation.raw_energy_kwh).abs() < 1e-9);

        let text = explanation.to_string();
        assert!(text.contains("= -12.00 kWh, clamped to 0 kWh"));
        assert!(text.contains("Predicted Energy: 0.00 kWh"));
    }

    #[test]
    fn test_explanation_sums_to_prediction() {
        let (model, _) = fit(&linear_history("2026-01-05 00:00", 24 * 60)).unwrap();
        let explanation = model.explain_at(start_of("2026-03-18 14:00"));

        let total: f64 = explanation.intercept
            + explanation.contributions.iter().map(|c| c.contribution).sum::<f64>();
        assert!((total - explanation.predicted_energy_kwh).abs() < 1e-9);
        assert_eq!(explanation.raw_energy_kwh, explanation.predicted_energy_kwh);
        assert!(!explanation.to_string().contains("clamped"));
        assert_eq!(explanation.contributions.len(), FEATURE_COUNT);
        assert_eq!(explanation.contributions[0].value, 14.0);

        let text = explanation.to_string();
        assert!(text.contains("HOW THE MODEL WORKS"));
        assert!(text.contains("Wednesday, 02:00 PM"));
        assert!(text.contains("hour: Each unit increases energy by 0.5000 kWh"));

        let french = explanation.render(&I18n::new("fr"));
        assert!(french.contains("augmente"));
    }
}
