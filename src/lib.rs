//! Energy analytics library
//!
//! Daily consumption, peak load, anomaly flags, carbon equivalents and
//! consumption forecasts over machine power readings.

pub mod analysis;
pub mod carbon;
pub mod core;
pub mod features;
pub mod forecast;
pub mod i18n;
pub mod sample;
