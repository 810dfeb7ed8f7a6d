//! Grid emission factors by region

use serde::{Deserialize, Serialize};

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "US_Average";

/// kg CO2 per kWh for the default region, also used for unknown regions
pub const DEFAULT_EMISSION_FACTOR: f64 = 0.385;

/// Known grid mixes and their kg CO2/kWh
pub const EMISSION_FACTORS: [(&str, f64); 8] = [
    ("US_Average", 0.385),
    ("Coal_Heavy", 0.95),
    ("Natural_Gas", 0.50),
    ("Renewable_Heavy", 0.10),
    ("UK", 0.20),
    ("France", 0.06), // mostly nuclear
    ("Germany", 0.38),
    ("India", 0.92),
];

/// Emission factor of a known region
pub fn lookup(region: &str) -> Option<f64> {
    EMISSION_FACTORS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, factor)| *factor)
}

/// Emissions of one energy amount under one region's grid mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionComparison {
    pub region: String,
    pub emission_factor: f64,
    pub co2_kg: f64,
    /// Factor relative to the default region, in percent
    pub percentage_of_default: f64,
}

/// CO2 for `energy_kwh` in every known region, in table order
pub fn compare_regions(energy_kwh: f64) -> Vec<RegionComparison> {
    EMISSION_FACTORS
        .iter()
        .map(|&(region, factor)| RegionComparison {
            region: region.to_string(),
            emission_factor: factor,
            co2_kg: energy_kwh * factor,
            percentage_of_default: factor / DEFAULT_EMISSION_FACTOR * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("France"), Some(0.06));
        assert_eq!(lookup(DEFAULT_REGION), Some(DEFAULT_EMISSION_FACTOR));
        assert_eq!(lookup("Atlantis"), None);
        assert_eq!(lookup("france"), None);
    }

    #[test]
    fn test_compare_regions() {
        let comparison = compare_regions(1000.0);
        assert_eq!(comparison.len(), EMISSION_FACTORS.len());

        let us = comparison.iter().find(|c| c.region == "US_Average").unwrap();
        assert_eq!(us.co2_kg, 385.0);
        assert!((us.percentage_of_default - 100.0).abs() < 1e-9);

        let coal = comparison.iter().find(|c| c.region == "Coal_Heavy").unwrap();
        assert_eq!(coal.co2_kg, 950.0);
        assert!(coal.percentage_of_default > 200.0);
    }
}
