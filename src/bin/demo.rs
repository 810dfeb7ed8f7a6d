//! Energy Analytics - Demo CLI
//!
//! Runs the whole engine over 60 days of synthetic hourly readings:
//! analysis report, carbon footprint, model training and a forecast.

use anyhow::Context;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

use energy_analytics_lib::analysis::{AnalysisReport, TimeSeriesAggregator};
use energy_analytics_lib::carbon::{compare_regions, CarbonConverter};
use energy_analytics_lib::core::Config;
use energy_analytics_lib::forecast::ConsumptionForecaster;
use energy_analytics_lib::i18n::I18n;
use energy_analytics_lib::sample::{generate_readings, inject_spike};

const SAMPLE_DAYS: usize = 60;
const SAMPLE_SEED: u64 = 42;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Could not load configuration, using defaults: {}", e);
        Config::default()
    });
    config.validate()?;

    println!("==============================================");
    println!("   Energy Analytics - Demo CLI");
    println!("==============================================\n");

    // 1. Sample data
    println!("[1/5] Generating {} days of hourly readings...", SAMPLE_DAYS);
    let start = NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid sample start date")?;
    let mut readings = generate_readings(start, SAMPLE_DAYS * 24, SAMPLE_SEED);
    for index in [100, 500, 1000] {
        inject_spike(&mut readings, index, 3.0);
    }
    println!("      {} readings, 3 injected spikes\n", readings.len());

    // 2. Analysis
    println!("[2/5] Analysis report");
    let report = AnalysisReport::generate(&readings, Some("MACHINE-001"), &config)?;
    print_json(&report)?;
    println!();

    // 3. Carbon footprint
    println!("[3/5] Carbon footprint ({})", config.carbon.region);
    let daily = TimeSeriesAggregator::new(&config.aggregation).daily_totals(&readings);
    let converter = CarbonConverter::new(&config.carbon).with_language(&config.general.language);
    let carbon = converter.report(&daily);
    print_json(&carbon)?;
    println!("\n      Same energy in other regions:");
    print_json(&compare_regions(carbon.summary.total_energy_kwh))?;
    println!();

    // 4. Training
    println!("[4/5] Training consumption model...");
    let forecaster = ConsumptionForecaster::new();
    let metrics = forecaster
        .train_on_readings(&readings, config.forecast.min_training_rows)
        .context("model training failed")?;
    print_json(&metrics)?;
    let explanation = forecaster.explain()?;
    println!("{}", explanation.render(&I18n::new(&config.general.language)));
    println!();

    // 5. Forecast
    let forecast_start = start + Duration::days(SAMPLE_DAYS as i64);
    println!(
        "[5/5] {}-day forecast from {}",
        config.forecast.horizon_days, forecast_start
    );
    let forecast = forecaster.forecast_next_days(
        forecast_start,
        config.forecast.horizon_days,
        config.forecast.frequency,
    )?;
    print_json(&forecast)?;

    println!("\n==============================================");
    println!("   Model status: {} rows", forecaster.status().trained_rows);
    println!("==============================================\n");

    Ok(())
}
