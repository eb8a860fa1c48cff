//! Air quality index bands and plant recommendations.
//!
//! | AQI       | Category                        | Tier   |
//! |-----------|---------------------------------|--------|
//! | 0-50      | Good                            | Green  |
//! | 51-100    | Moderate                        | Yellow |
//! | 101-150   | Unhealthy for sensitive groups  | Orange |
//! | 151-200   | Unhealthy                       | Red    |
//! | 201-300   | Very unhealthy                  | Red    |
//! | above 300 | Hazardous                       | Red    |

use serde::{Deserialize, Serialize};

use crate::classify::{classify, EcoTier, Threshold, ThresholdTable};
use crate::error::ImpactError;

/// AQI at or below which no plants are recommended.
pub const CLEAN_AIR_AQI: f64 = 50.0;

/// AQI points covered by each recommended plant.
pub const AQI_POINTS_PER_PLANT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            AqiCategory::Good => "Air quality is satisfactory.",
            AqiCategory::Moderate => {
                "Air quality is acceptable. Unusually sensitive people should limit long outdoor exertion."
            }
            AqiCategory::UnhealthyForSensitiveGroups => {
                "Sensitive groups should reduce prolonged outdoor exertion."
            }
            AqiCategory::Unhealthy => "Everyone should reduce prolonged outdoor exertion.",
            AqiCategory::VeryUnhealthy => "Avoid outdoor activity; keep windows closed.",
            AqiCategory::Hazardous => "Stay indoors and use air purification if available.",
        }
    }
}

pub fn aqi_categories() -> ThresholdTable<AqiCategory> {
    ThresholdTable::preset(vec![
        Threshold::at_most(50.0, AqiCategory::Good),
        Threshold::at_most(100.0, AqiCategory::Moderate),
        Threshold::at_most(150.0, AqiCategory::UnhealthyForSensitiveGroups),
        Threshold::at_most(200.0, AqiCategory::Unhealthy),
        Threshold::at_most(300.0, AqiCategory::VeryUnhealthy),
        Threshold::at_most(f64::INFINITY, AqiCategory::Hazardous),
    ])
}

pub fn aqi_tiers() -> ThresholdTable<EcoTier> {
    ThresholdTable::preset(vec![
        Threshold::at_most(50.0, EcoTier::Green),
        Threshold::at_most(100.0, EcoTier::Yellow),
        Threshold::at_most(150.0, EcoTier::Orange),
        Threshold::at_most(f64::INFINITY, EcoTier::Red),
    ])
}

pub fn aqi_category(aqi: f64) -> AqiCategory {
    classify(aqi, &aqi_categories())
}

pub fn aqi_tier(aqi: f64) -> EcoTier {
    classify(aqi, &aqi_tiers())
}

/// `ceil((aqi - 50) / 10)`, never below zero.
pub fn plants_needed(aqi: f64) -> u32 {
    let plants = ((aqi - CLEAN_AIR_AQI) / AQI_POINTS_PER_PLANT).ceil();
    if plants.is_nan() || plants <= 0.0 {
        0
    } else {
        plants as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    pub aqi: f64,
    pub category: AqiCategory,
    pub tier: EcoTier,
    pub plants_needed: u32,
}

/// Classify one AQI reading. Readings must be finite and `>= 0`.
pub fn assess_air_quality(aqi: f64) -> Result<AirQualityReport, ImpactError> {
    if !aqi.is_finite() || aqi < 0.0 {
        return Err(ImpactError::invalid("aqi", aqi, "must be a finite number >= 0"));
    }
    Ok(AirQualityReport {
        aqi,
        category: aqi_category(aqi),
        tier: aqi_tier(aqi),
        plants_needed: plants_needed(aqi),
    })
}

/// A named place with its current AQI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    pub name: String,
    pub report: AirQualityReport,
}

/// Assess several places, cleanest first.
pub fn rank_locations(readings: &[(&str, f64)]) -> Result<Vec<LocationReport>, ImpactError> {
    let mut ranked = readings
        .iter()
        .map(|(name, aqi)| {
            Ok(LocationReport {
                name: (*name).to_string(),
                report: assess_air_quality(*aqi)?,
            })
        })
        .collect::<Result<Vec<_>, ImpactError>>()?;
    ranked.sort_by(|a, b| a.report.aqi.total_cmp(&b.report.aqi));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(aqi_category(0.0), AqiCategory::Good);
        assert_eq!(aqi_category(50.0), AqiCategory::Good);
        assert_eq!(aqi_category(51.0), AqiCategory::Moderate);
        assert_eq!(aqi_category(150.0), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(aqi_category(156.0), AqiCategory::Unhealthy);
        assert_eq!(aqi_category(300.0), AqiCategory::VeryUnhealthy);
        assert_eq!(aqi_category(301.0), AqiCategory::Hazardous);
        assert_eq!(aqi_category(5000.0), AqiCategory::Hazardous);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(aqi_tier(62.0), EcoTier::Yellow);
        assert_eq!(aqi_tier(145.0), EcoTier::Orange);
        assert_eq!(aqi_tier(180.0), EcoTier::Red);
        assert_eq!(aqi_tier(220.0), EcoTier::Red);
        assert_eq!(aqi_tier(50.0), EcoTier::Green);
    }

    #[test]
    fn test_plants_needed() {
        assert_eq!(plants_needed(156.0), 11);
        assert_eq!(plants_needed(60.0), 1);
        assert_eq!(plants_needed(61.0), 2);
        assert_eq!(plants_needed(50.0), 0);
        assert_eq!(plants_needed(12.0), 0);
    }

    #[test]
    fn test_assess_rejects_bad_readings() {
        assert!(assess_air_quality(-1.0).is_err());
        assert!(assess_air_quality(f64::NAN).is_err());
        let report = assess_air_quality(156.0).unwrap();
        assert_eq!(report.tier, EcoTier::Red);
        assert_eq!(report.plants_needed, 11);
    }

    #[test]
    fn test_tables_are_valid() {
        assert!(ThresholdTable::new(aqi_categories().thresholds().to_vec()).is_ok());
        assert!(ThresholdTable::new(aqi_tiers().thresholds().to_vec()).is_ok());
    }

    #[test]
    fn test_rank_locations_cleanest_first() {
        let ranked = rank_locations(&[
            ("City Center", 180.0),
            ("Industrial Area", 220.0),
            ("Residential Zone", 145.0),
            ("Green Park Area", 85.0),
            ("Riverside", 62.0),
        ])
        .unwrap();
        let names: Vec<&str> = ranked.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Riverside",
                "Green Park Area",
                "Residential Zone",
                "City Center",
                "Industrial Area"
            ]
        );
    }
}
