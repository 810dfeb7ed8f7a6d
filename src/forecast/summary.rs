//! Per-day rollup of a forecast range

use super::model::ForecastPoint;
use chrono::{NaiveDate, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day_name: String,
    pub total_kwh: f64,
    pub average_kwh: f64,
    pub peak_kwh: f64,
    pub peak_hour: u32,
    pub low_kwh: f64,
    pub low_hour: u32,
    pub hourly_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub daily_summary: Vec<ForecastDay>,
    pub total_forecast_kwh: f64,
    pub average_daily_kwh: f64,
    pub peak_day: Option<NaiveDate>,
    pub peak_day_kwh: f64,
}

impl ForecastSummary {
    /// Group points by calendar date
    ///
    /// Ties for peak and low keep the earliest point; ties for peak day keep
    /// the earliest date.
    pub fn from_points(points: &[ForecastPoint]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<&ForecastPoint>> = BTreeMap::new();
        for point in points {
            by_date.entry(point.timestamp.date()).or_default().push(point);
        }

        let daily_summary: Vec<ForecastDay> = by_date
            .into_iter()
            .filter_map(|(date, day_points)| summarize_day(date, &day_points))
            .collect();

        let total_forecast_kwh: f64 = daily_summary.iter().map(|d| d.total_kwh).sum();
        let average_daily_kwh = if daily_summary.is_empty() {
            0.0
        } else {
            total_forecast_kwh / daily_summary.len() as f64
        };

        let peak = daily_summary
            .iter()
            .fold(None::<&ForecastDay>, |best, day| match best {
                Some(b) if b.total_kwh >= day.total_kwh => Some(b),
                _ => Some(day),
            });

        Self {
            total_forecast_kwh,
            average_daily_kwh,
            peak_day: peak.map(|d| d.date),
            peak_day_kwh: peak.map(|d| d.total_kwh).unwrap_or(0.0),
            daily_summary,
        }
    }
}

fn summarize_day(date: NaiveDate, points: &[&ForecastPoint]) -> Option<ForecastDay> {
    let first = points.first()?;
    let mut peak = *first;
    let mut low = *first;
    let mut total = 0.0;

    for point in points {
        total += point.predicted_energy_kwh;
        if point.predicted_energy_kwh > peak.predicted_energy_kwh {
            peak = point;
        }
        if point.predicted_energy_kwh < low.predicted_energy_kwh {
            low = point;
        }
    }

    Some(ForecastDay {
        date,
        day_name: date.format("%A").to_string(),
        total_kwh: total,
        average_kwh: total / points.len() as f64,
        peak_kwh: peak.predicted_energy_kwh,
        peak_hour: peak.timestamp.hour(),
        low_kwh: low.predicted_energy_kwh,
        low_hour: low.timestamp.hour(),
        hourly_count: points.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::start_of;

    fn point(ts: &str, kwh: f64) -> ForecastPoint {
        ForecastPoint {
            timestamp: start_of(ts),
            predicted_energy_kwh: kwh,
        }
    }

    #[test]
    fn test_groups_by_date() {
        let points = vec![
            point("2026-03-18 08:00", 10.0),
            point("2026-03-18 14:00", 30.0),
            point("2026-03-18 23:00", 5.0),
            point("2026-03-19 02:00", 4.0),
            point("2026-03-19 13:00", 12.0),
        ];
        let summary = ForecastSummary::from_points(&points);

        assert_eq!(summary.daily_summary.len(), 2);
        let wed = &summary.daily_summary[0];
        assert_eq!(wed.day_name, "Wednesday");
        assert_eq!(wed.total_kwh, 45.0);
        assert_eq!(wed.average_kwh, 15.0);
        assert_eq!((wed.peak_kwh, wed.peak_hour), (30.0, 14));
        assert_eq!((wed.low_kwh, wed.low_hour), (5.0, 23));
        assert_eq!(wed.hourly_count, 3);

        let thu = &summary.daily_summary[1];
        assert_eq!(thu.day_name, "Thursday");
        assert_eq!(thu.total_kwh, 16.0);

        assert_eq!(summary.total_forecast_kwh, 61.0);
        assert_eq!(summary.average_daily_kwh, 30.5);
        assert_eq!(summary.peak_day, NaiveDate::from_ymd_opt(2026, 3, 18));
        assert_eq!(summary.peak_day_kwh, 45.0);
    }

    #[test]
    fn test_ties_keep_earliest() {
        let points = vec![
            point("2026-03-18 01:00", 7.0),
            point("2026-03-18 02:00", 7.0),
            point("2026-03-19 01:00", 14.0),
        ];
        let summary = ForecastSummary::from_points(&points);
        assert_eq!(summary.daily_summary[0].peak_hour, 1);
        assert_eq!(summary.daily_summary[0].low_hour, 1);
        assert_eq!(summary.peak_day, NaiveDate::from_ymd_opt(2026, 3, 18));
    }

    #[test]
    fn test_empty_points() {
        let summary = ForecastSummary::from_points(&[]);
        assert!(summary.daily_summary.is_empty());
        assert_eq!(summary.total_forecast_kwh, 0.0);
        assert_eq!(summary.average_daily_kwh, 0.0);
        assert_eq!(summary.peak_day, None);
    }
}
