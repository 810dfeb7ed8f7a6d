//! Time feature extraction for the consumption model
//!
//! Every timestamp maps to the same six numeric inputs:
//! hour, day of week (Monday = 0), day of month, month,
//! weekend flag and business-hour flag (09:00 to 16:59).

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Number of features fed to the regression model
pub const FEATURE_COUNT: usize = 6;

/// Feature names in model column order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "hour",
    "day_of_week",
    "day_of_month",
    "month",
    "is_weekend",
    "is_business_hour",
];

const BUSINESS_HOURS_START: u32 = 9;
const BUSINESS_HOURS_END: u32 = 17;

/// Time-derived features for a single timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFeatures {
    pub hour: u32,
    pub day_of_week: u32,
    pub day_of_month: u32,
    pub month: u32,
    pub is_weekend: u32,
    pub is_business_hour: u32,
}

impl TimeFeatures {
    /// Extract features from a timestamp
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        let hour = timestamp.hour();
        let day_of_week = timestamp.weekday().num_days_from_monday();

        Self {
            hour,
            day_of_week,
            day_of_month: timestamp.day(),
            month: timestamp.month(),
            is_weekend: u32::from(day_of_week >= 5),
            is_business_hour: u32::from((BUSINESS_HOURS_START..BUSINESS_HOURS_END).contains(&hour)),
        }
    }

    /// Features as a model input row
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.hour),
            f64::from(self.day_of_week),
            f64::from(self.day_of_month),
            f64::from(self.month),
            f64::from(self.is_weekend),
            f64::from(self.is_business_hour),
        ]
    }
}

/// Shorthand for `TimeFeatures::from_timestamp(ts).to_vector()`
pub fn features(timestamp: &NaiveDateTime) -> [f64; FEATURE_COUNT] {
    TimeFeatures::from_timestamp(timestamp).to_vector()
}
