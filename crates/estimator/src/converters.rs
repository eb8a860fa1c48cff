//! Unit converters: raw activity quantity -> impact value.
//!
//! | Category    | Formula                                               |
//! |-------------|-------------------------------------------------------|
//! | Transport   | `factor[vehicle] * km`                                |
//! | Diet        | `factor[meal] / 1000 * portions * grams_per_portion`  |
//! | Electricity | `kWh * grid_co2_kg_per_kwh` (bill: `kWh * rate`)      |
//! | Appliance   | `kWh * grid_co2_kg_per_kwh`                           |
//! | Water       | `liters` (identity)                                   |
//! | Waste       | `kg` (identity)                                       |
//!
//! Quantities must be finite and `>= 0`. Zero is a valid "no activity"
//! observation and yields zero impact.

use serde::{Deserialize, Serialize};

use crate::error::ImpactError;
use crate::factors::{
    EmissionFactor, ImpactCategory, GRAMS_PER_PORTION, GRID_CO2_KG_PER_KWH, RATE_PER_KWH,
};

// =============================================================================
// Parameters
// =============================================================================

/// The tunable inputs of the converters. Factor tables stay fixed; these are
/// the values a deployment may localize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionParams {
    /// Mass of one meal portion in grams.
    pub grams_per_portion: f64,
    /// Grid carbon intensity applied to electricity and appliance entries.
    pub grid_co2_kg_per_kwh: f64,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            grams_per_portion: GRAMS_PER_PORTION,
            grid_co2_kg_per_kwh: GRID_CO2_KG_PER_KWH,
        }
    }
}

/// Electricity pricing and carbon intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tariff {
    /// Currency units per kWh.
    pub rate_per_kwh: f64,
    /// kg CO2e per kWh.
    pub grid_co2_kg_per_kwh: f64,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            rate_per_kwh: RATE_PER_KWH,
            grid_co2_kg_per_kwh: GRID_CO2_KG_PER_KWH,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Reject negative and non-finite quantities. Zero passes.
pub fn validate_quantity(field: &'static str, quantity: f64) -> Result<f64, ImpactError> {
    if !quantity.is_finite() {
        return Err(ImpactError::invalid(field, quantity, "must be a finite number"));
    }
    if quantity < 0.0 {
        return Err(ImpactError::invalid(field, quantity, "must be >= 0"));
    }
    Ok(quantity)
}

// =============================================================================
// Converters
// =============================================================================

/// Convert `quantity` of `category` into its impact using the default
/// parameters.
pub fn compute_impact(category: ImpactCategory, quantity: f64) -> Result<f64, ImpactError> {
    compute_impact_with(&ConversionParams::default(), category, quantity)
}

/// Convert `quantity` of `category` into its impact.
///
/// The result is in the category's domain unit: kg CO2e for transport, diet,
/// electricity and appliances; liters for water; kg for waste.
pub fn compute_impact_with(
    params: &ConversionParams,
    category: ImpactCategory,
    quantity: f64,
) -> Result<f64, ImpactError> {
    let quantity = validate_quantity("quantity", quantity)?;
    let factor = EmissionFactor::for_category(category).factor_per_unit;

    let impact = match category {
        ImpactCategory::Transport(_) => factor * quantity,
        ImpactCategory::Diet(_) => (factor / 1000.0) * quantity * params.grams_per_portion,
        ImpactCategory::Electricity | ImpactCategory::Appliance(_) => {
            quantity * params.grid_co2_kg_per_kwh
        }
        ImpactCategory::Water(_) | ImpactCategory::Waste(_) => quantity,
    };
    Ok(impact)
}

/// Bill and carbon for one electricity reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricityEstimate {
    pub units: f64,
    pub bill: f64,
    pub carbon_kg: f64,
}

/// `bill = units * rate`, `carbon_kg = units * grid factor`.
pub fn estimate_electricity(units: f64, tariff: &Tariff) -> Result<ElectricityEstimate, ImpactError> {
    let units = validate_quantity("units", units)?;
    Ok(ElectricityEstimate {
        units,
        bill: units * tariff.rate_per_kwh,
        carbon_kg: units * tariff.grid_co2_kg_per_kwh,
    })
}

// =============================================================================
// Unit tests
// =============================================================================
