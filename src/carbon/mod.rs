//! Carbon accounting for energy consumption
//!
//! Converts daily energy totals into CO2 using a grid emission factor:
//! - Region lookup with an optional explicit factor override
//! - Daily and period totals (kg and tonnes)
//! - Everyday equivalencies (car miles, trees, car-months)
//! - Threshold-based observations and recommendations
//!
//! An unknown region falls back to the US average factor instead of failing.
//! The fallback is logged and reported as a warning.

mod regions;

pub use regions::{compare_regions, lookup, RegionComparison, DEFAULT_EMISSION_FACTOR, DEFAULT_REGION, EMISSION_FACTORS};

use crate::core::{CarbonConfig, DailyAggregate};
use crate::i18n::I18n;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average passenger car, kg CO2 per km
const CAR_CO2_KG_PER_KM: f64 = 0.41;
const MILES_PER_KM: f64 = 0.621371;
/// CO2 absorbed by one tree per year, kg
const TREE_CO2_KG_PER_YEAR: f64 = 20.0;
/// Average passenger car, tonnes CO2 per year
const CAR_CO2_TONNES_PER_YEAR: f64 = 4.6;

const HIGH_MONTHLY_KG: f64 = 50_000.0;
const MODERATE_MONTHLY_KG: f64 = 10_000.0;
const DEMAND_MANAGEMENT_MONTHLY_KG: f64 = 30_000.0;
const HIGH_DAILY_AVERAGE_KG: f64 = 500.0;

/// CO2 for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEmission {
    pub date: NaiveDate,
    pub energy_kwh: f64,
    pub co2_kg: f64,
}

/// Period totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonSummary {
    pub region: String,
    pub emission_factor_kg_per_kwh: f64,
    pub total_days_analyzed: usize,
    pub total_energy_kwh: f64,
    pub monthly_co2_kg: f64,
    pub monthly_co2_tonnes: f64,
    pub daily_average_co2_kg: f64,
    pub daily_min_co2_kg: f64,
    pub daily_max_co2_kg: f64,
}

/// Relatable equivalents of a CO2 mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equivalencies {
    /// Miles driven by an average car
    pub car_miles: f64,
    /// Trees needed to absorb the emissions over a year at this rate
    pub trees_per_year: f64,
    /// Months of an average car's emissions
    pub car_months: f64,
}

impl Equivalencies {
    pub fn from_co2_kg(co2_kg: f64) -> Self {
        Self {
            car_miles: co2_kg / CAR_CO2_KG_PER_KM * MILES_PER_KM,
            trees_per_year: co2_kg * 12.0 / TREE_CO2_KG_PER_YEAR,
            car_months: (co2_kg / 1000.0) / (CAR_CO2_TONNES_PER_YEAR / 12.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub observations: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulasUsed {
    pub daily_co2_kg: String,
    pub monthly_co2_kg: String,
    pub monthly_co2_tonnes: String,
}

/// Complete carbon footprint report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonReport {
    pub summary: CarbonSummary,
    pub daily_breakdown: Vec<DailyEmission>,
    pub equivalencies: Equivalencies,
    pub insights: Insights,
    pub formulas_used: FormulasUsed,
    pub warnings: Vec<String>,
}

/// Converts energy into CO2 for a configured region
pub struct CarbonConverter {
    region: String,
    emission_factor: f64,
    region_known: bool,
    overridden: bool,
    i18n: I18n,
}

impl CarbonConverter {
    /// Create a converter with the given configuration
    ///
    /// An explicit `emission_factor` wins over the region lookup.
    pub fn new(config: &CarbonConfig) -> Self {
        let looked_up = regions::lookup(&config.region);

        let emission_factor = match (config.emission_factor, looked_up) {
            (Some(factor), _) => factor,
            (None, Some(factor)) => factor,
            (None, None) => {
                log::warn!(
                    "Unknown region '{}', using default emission factor {} kg CO2/kWh",
                    config.region,
                    DEFAULT_EMISSION_FACTOR
                );
                DEFAULT_EMISSION_FACTOR
            }
        };

        Self {
            region: config.region.clone(),
            emission_factor,
            region_known: looked_up.is_some(),
            overridden: config.emission_factor.is_some(),
            i18n: I18n::new("en"),
        }
    }

    /// Render insight text in the given language ("auto", "en", "fr")
    pub fn with_language(mut self, lang: &str) -> Self {
        self.i18n.set_language(lang);
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// kg CO2/kWh in effect
    pub fn emission_factor(&self) -> f64 {
        self.emission_factor
    }

    /// Whether the configured region is in the emission factor table
    pub fn is_known_region(&self) -> bool {
        self.region_known
    }

    /// CO2 per day: `energy_kwh * factor`
    pub fn convert(daily: &[DailyAggregate], factor: f64) -> Vec<DailyEmission> {
        daily
            .iter()
            .map(|d| DailyEmission {
                date: d.date,
                energy_kwh: d.total_energy_kwh,
                co2_kg: d.total_energy_kwh * factor,
            })
            .collect()
    }

    /// Classify the period total and daily average into observations and recommendations
    pub fn insights(&self, monthly_co2_kg: f64, daily_average_co2_kg: f64) -> Insights {
        let tonnes = format!("{:.1}", monthly_co2_kg / 1000.0);
        let level_key = if monthly_co2_kg > HIGH_MONTHLY_KG {
            "carbon.observation.high"
        } else if monthly_co2_kg > MODERATE_MONTHLY_KG {
            "carbon.observation.moderate"
        } else {
            "carbon.observation.low"
        };

        let observations = vec![
            self.i18n.format(level_key, &[("tonnes", tonnes)]),
            self.i18n.format(
                "carbon.observation.daily_average",
                &[("kg", format!("{:.1}", daily_average_co2_kg))],
            ),
        ];

        let mut recommendations = Vec::new();
        if daily_average_co2_kg > HIGH_DAILY_AVERAGE_KG {
            recommendations.push(self.i18n.get("carbon.recommendation.efficiency"));
            recommendations.push(self.i18n.get("carbon.recommendation.renewables"));
        }
        if monthly_co2_kg > DEMAND_MANAGEMENT_MONTHLY_KG {
            recommendations.push(self.i18n.get("carbon.recommendation.demand"));
        }
        recommendations.push(self.i18n.get("carbon.recommendation.monitor"));

        Insights {
            observations,
            recommendations,
        }
    }

    /// Build the full report for a set of daily totals
    ///
    /// Empty input yields an all-zero summary.
    pub fn report(&self, daily: &[DailyAggregate]) -> CarbonReport {
        let breakdown = Self::convert(daily, self.emission_factor);

        let monthly_co2_kg: f64 = breakdown.iter().map(|d| d.co2_kg).sum();
        let total_energy_kwh: f64 = breakdown.iter().map(|d| d.energy_kwh).sum();
        let (daily_average, daily_min, daily_max) = if breakdown.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                monthly_co2_kg / breakdown.len() as f64,
                breakdown.iter().map(|d| d.co2_kg).fold(f64::INFINITY, f64::min),
                breakdown.iter().map(|d| d.co2_kg).fold(f64::NEG_INFINITY, f64::max),
            )
        };

        let mut warnings = Vec::new();
        if !self.region_known && !self.overridden {
            warnings.push(self.i18n.format(
                "carbon.warning.unknown_region",
                &[
                    ("region", self.region.clone()),
                    ("factor", DEFAULT_EMISSION_FACTOR.to_string()),
                ],
            ));
        }

        CarbonReport {
            summary: CarbonSummary {
                region: self.region.clone(),
                emission_factor_kg_per_kwh: self.emission_factor,
                total_days_analyzed: breakdown.len(),
                total_energy_kwh,
                monthly_co2_kg,
                monthly_co2_tonnes: monthly_co2_kg / 1000.0,
                daily_average_co2_kg: daily_average,
                daily_min_co2_kg: daily_min,
                daily_max_co2_kg: daily_max,
            },
            equivalencies: Equivalencies::from_co2_kg(monthly_co2_kg),
            insights: self.insights(monthly_co2_kg, daily_average),
            formulas_used: FormulasUsed {
                daily_co2_kg: self.i18n.get("carbon.formula.daily"),
                monthly_co2_kg: self.i18n.get("carbon.formula.monthly"),
                monthly_co2_tonnes: self.i18n.get("carbon.formula.tonnes"),
            },
            daily_breakdown: breakdown,
            warnings,
        }
    }
}

impl Default for CarbonConverter {
    fn default() -> Self {
        Self::new(&CarbonConfig::default())
    }
}
