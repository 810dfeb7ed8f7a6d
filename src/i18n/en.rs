//! English translations

use std::collections::HashMap;

pub fn get_translations() -> HashMap<String, String> {
    let mut t = HashMap::new();

    // Carbon observations
    t.insert("carbon.observation.high".into(), "High monthly emissions: {tonnes} tonnes CO2".into());
    t.insert("carbon.observation.moderate".into(), "Moderate monthly emissions: {tonnes} tonnes CO2".into());
    t.insert("carbon.observation.low".into(), "Low monthly emissions: {tonnes} tonnes CO2".into());
    t.insert("carbon.observation.daily_average".into(), "Average daily emissions: {kg} kg CO2".into());

    // Carbon recommendations
    t.insert("carbon.recommendation.efficiency".into(), "Consider energy efficiency improvements (LED lights, HVAC optimization)".into());
    t.insert("carbon.recommendation.renewables".into(), "Explore renewable energy options (solar, wind)".into());
    t.insert("carbon.recommendation.demand".into(), "Implement demand management to reduce peak consumption".into());
    t.insert("carbon.recommendation.monitor".into(), "Monitor consumption trends to identify anomalies".into());

    // Carbon warnings
    t.insert("carbon.warning.unknown_region".into(), "Unknown region '{region}', using default emission factor {factor} kg CO2/kWh".into());

    // Carbon formulas
    t.insert("carbon.formula.daily".into(), "Energy (kWh) \u{00D7} Emission Factor (kg CO2/kWh)".into());
    t.insert("carbon.formula.monthly".into(), "Sum of all daily CO2 emissions".into());
    t.insert("carbon.formula.tonnes".into(), "Monthly CO2 / 1000".into());

    // Model explanation
    t.insert("explain.title".into(), "HOW THE MODEL WORKS".into());
    t.insert("explain.formula".into(), "Energy (kWh) = Base + (Hour \u{00D7} {hour}) + (Day of Week \u{00D7} {day_of_week}) + ...".into());
    t.insert("explain.interpretation".into(), "Interpretation:".into());
    t.insert("explain.increases".into(), "increases".into());
    t.insert("explain.decreases".into(), "decreases".into());
    t.insert("explain.feature_effect".into(), "\u{2022} {feature}: Each unit {direction} energy by {impact} kWh".into());
    t.insert("explain.base".into(), "\u{2022} Base Energy (Intercept): {intercept} kWh".into());
    t.insert("explain.base_note".into(), "  (Energy consumed regardless of time)".into());
    t.insert("explain.example_title".into(), "EXAMPLE PREDICTION".into());
    t.insert("explain.time".into(), "Time: {time}".into());
    t.insert("explain.predicted".into(), "Predicted Energy: {energy} kWh".into());
    t.insert("explain.calculated_as".into(), "Calculated as:".into());
    t.insert("explain.base_line".into(), "  Base: {intercept} kWh".into());
    t.insert("explain.contribution".into(), "  + {feature} ({value}) \u{00D7} {coefficient} = {contribution} kWh".into());
    t.insert("explain.clamped".into(), "  = {raw} kWh, clamped to 0 kWh (consumption cannot be negative)".into());

    t
}
