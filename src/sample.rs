//! Synthetic reading generator
//!
//! Produces hourly readings with a daytime load curve, a weekday uplift
//! and Gaussian noise. Seeded so demos and tests are reproducible.

use crate::core::Reading;
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::PI;

const SAMPLE_MACHINE_ID: &str = "MACHINE-001";
const BASE_LOAD_KWH: f64 = 20.0;
const DAILY_SWING_KWH: f64 = 15.0;
const WEEKDAY_UPLIFT_KWH: f64 = 5.0;
const WEEKEND_UPLIFT_KWH: f64 = 2.0;
const NOISE_STD_KWH: f64 = 3.0;
const FLOOR_KWH: f64 = 5.0;

/// Generate `count` hourly readings starting at `start`
pub fn generate_readings(start: NaiveDateTime, count: usize, seed: u64) -> Vec<Reading> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let timestamp = start + Duration::hours(i as i64);
            let hour_factor = DAILY_SWING_KWH * ((f64::from(timestamp.hour()) - 6.0) * PI / 24.0).sin();
            let day_factor = if timestamp.weekday().num_days_from_monday() < 5 {
                WEEKDAY_UPLIFT_KWH
            } else {
                WEEKEND_UPLIFT_KWH
            };
            let noise: f64 = rng.sample::<f64, _>(StandardNormal) * NOISE_STD_KWH;
            let energy = (BASE_LOAD_KWH + hour_factor + day_factor + noise).max(FLOOR_KWH);

            // One-hour readings: average kW equals kWh consumed
            Reading {
                timestamp,
                power_kw: energy,
                energy_consumed_kwh: energy,
                machine_id: SAMPLE_MACHINE_ID.to_string(),
            }
        })
        .collect()
}

/// Inject a power spike at `index`, scaling the reading by `factor`
pub fn inject_spike(readings: &mut [Reading], index: usize, factor: f64) {
    if let Some(reading) = readings.get_mut(index) {
        reading.power_kw *= factor;
        reading.energy_consumed_kwh *= factor;
    }
}

#[cfg(test)]
pub(crate) fn start_of(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

#[cfg(test)]
pub(crate) fn reading_at(s: &str, power_kw: f64, energy_consumed_kwh: f64) -> Reading {
    Reading::new(start_of(s), power_kw, energy_consumed_kwh, SAMPLE_MACHINE_ID).unwrap()
}
