//! Emission factor tables.
//!
//! Every activity the estimator understands is a variant of a closed enum,
//! and [`EmissionFactor::for_category`] maps each one to its factor with an
//! exhaustive `match`. An unknown category therefore cannot reach the
//! converters: string keys are resolved once at the boundary by [`lookup`],
//! which reports a miss as [`ImpactError::UnknownCategory`] instead of a
//! zero factor.
//!
//! | Domain      | Quantity | Factor unit        | Impact    |
//! |-------------|----------|--------------------|-----------|
//! | transport   | km       | kg CO2e / km       | kg CO2e   |
//! | diet        | portions | kg CO2e / kg food  | kg CO2e   |
//! | electricity | kWh      | kg CO2e / kWh      | kg CO2e   |
//! | appliance   | kWh      | kg CO2e / kWh      | kg CO2e   |
//! | water       | L        | identity           | L         |
//! | waste       | kg       | identity           | kg        |

pub mod constants;
pub mod types;


use crate::error::ImpactError;

pub use constants::*;
pub use types::{
    ApplianceKind, EmissionFactor, ImpactCategory, ImpactDomain, MealKind, VehicleKind,
    WasteStream, WaterUse,
};

/// Resolve a string key (`"car"`, `"diet.chicken"`, `"electricity"`) to its
/// emission factor.
pub fn lookup(key: &str) -> Result<EmissionFactor, ImpactError> {
    key.parse::<ImpactCategory>()
        .map(EmissionFactor::for_category)
}
