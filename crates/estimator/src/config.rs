//! Data-driven estimator parameters.
//!
//! Every tunable the estimator reads lives in the [`EstimatorConfig`]
//! resource: budgets, tariff, portion size, daily baselines and the mock
//! distance provider. Factor tables are not configurable.
//!
//! The config is loaded from JSON. Missing sections and fields fall back to
//! their defaults, so a file only needs to list what it overrides:
//!
//! ```json
//! { "limits": { "daily_water_liters": 150.0 }, "tariff": { "rate_per_kwh": 7.5 } }
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::converters::{ConversionParams, Tariff};
use crate::error::{ConfigError, ImpactError};
use crate::factors::GRAMS_PER_PORTION;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DAILY_CARBON_LIMIT_KG: f64 = 4.0;
pub const DAILY_WATER_LIMIT_LITERS: f64 = 200.0;
pub const MONTHLY_ELECTRICITY_BUDGET: f64 = 500.0;

/// Fixed daily home-energy contribution in kg CO2e.
pub const HOME_ENERGY_BASELINE_KG: f64 = 0.8;
/// Fixed daily shopping contribution in kg CO2e.
pub const SHOPPING_BASELINE_KG: f64 = 0.4;

pub const WATER_WARNING_PERCENT: f64 = 80.0;

pub const MOCK_DISTANCE_SEED: u64 = 42;
pub const MOCK_DISTANCE_MIN_KM: f64 = 2.0;
pub const MOCK_DISTANCE_MAX_KM: f64 = 17.0;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub daily_carbon_kg: f64,
    pub daily_water_liters: f64,
    /// Monthly electricity bill budget, in currency units.
    pub monthly_electricity_budget: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            daily_carbon_kg: DAILY_CARBON_LIMIT_KG,
            daily_water_liters: DAILY_WATER_LIMIT_LITERS,
            monthly_electricity_budget: MONTHLY_ELECTRICITY_BUDGET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietConfig {
    pub grams_per_portion: f64,
}

impl Default for DietConfig {
    fn default() -> Self {
        Self {
            grams_per_portion: GRAMS_PER_PORTION,
        }
    }
}

/// Daily carbon that is always counted, whatever was logged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    pub home_energy_kg: f64,
    pub shopping_kg: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            home_energy_kg: HOME_ENERGY_BASELINE_KG,
            shopping_kg: SHOPPING_BASELINE_KG,
        }
    }
}

/// Seeded stand-in for a geocoding service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockDistanceConfig {
    pub seed: u64,
    pub min_km: f64,
    pub max_km: f64,
    /// Polls a lookup stays pending before it resolves.
    pub pending_polls: u32,
}

impl Default for MockDistanceConfig {
    fn default() -> Self {
        Self {
            seed: MOCK_DISTANCE_SEED,
            min_km: MOCK_DISTANCE_MIN_KM,
            max_km: MOCK_DISTANCE_MAX_KM,
            pending_polls: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// EstimatorConfig
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub limits: LimitsConfig,
    pub tariff: Tariff,
    pub diet: DietConfig,
    pub baselines: BaselineConfig,
    /// Water usage above this percent of the daily limit is flagged.
    pub water_warning_percent: f64,
    pub mock_distance: MockDistanceConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            limits: LimitsConfig::default(),
            tariff: Tariff::default(),
            diet: DietConfig::default(),
            baselines: BaselineConfig::default(),
            water_warning_percent: WATER_WARNING_PERCENT,
            mock_distance: MockDistanceConfig::default(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ImpactError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ImpactError::invalid(field, value, "must be a finite number > 0"));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ImpactError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ImpactError::invalid(field, value, "must be a finite number >= 0"));
    }
    Ok(())
}

impl EstimatorConfig {
    /// Check every value is in range. Called by both loaders.
    pub fn validate(&self) -> Result<(), ImpactError> {
        positive("limits.daily_carbon_kg", self.limits.daily_carbon_kg)?;
        positive("limits.daily_water_liters", self.limits.daily_water_liters)?;
        positive(
            "limits.monthly_electricity_budget",
            self.limits.monthly_electricity_budget,
        )?;
        positive("tariff.rate_per_kwh", self.tariff.rate_per_kwh)?;
        non_negative("tariff.grid_co2_kg_per_kwh", self.tariff.grid_co2_kg_per_kwh)?;
        positive("diet.grams_per_portion", self.diet.grams_per_portion)?;
        non_negative("baselines.home_energy_kg", self.baselines.home_energy_kg)?;
        non_negative("baselines.shopping_kg", self.baselines.shopping_kg)?;
        positive("water_warning_percent", self.water_warning_percent)?;
        positive("mock_distance.min_km", self.mock_distance.min_km)?;
        positive("mock_distance.max_km", self.mock_distance.max_km)?;
        if self.mock_distance.min_km > self.mock_distance.max_km {
            return Err(ImpactError::invalid(
                "mock_distance.max_km",
                self.mock_distance.max_km,
                "must be >= min_km",
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EstimatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn conversion_params(&self) -> ConversionParams {
        ConversionParams {
            grams_per_portion: self.diet.grams_per_portion,
            grid_co2_kg_per_kwh: self.tariff.grid_co2_kg_per_kwh,
        }
    }
}
