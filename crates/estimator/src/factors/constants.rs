//! Emission factor constants.

// -- Transport: kg CO2e per km travelled --------------------------------------

pub const CAR_KG_PER_KM: f64 = 0.21;
pub const MOTORCYCLE_KG_PER_KM: f64 = 0.1;
pub const BUS_KG_PER_KM: f64 = 0.089;
pub const TRAIN_KG_PER_KM: f64 = 0.041;
pub const BICYCLE_KG_PER_KM: f64 = 0.0;
pub const WALKING_KG_PER_KM: f64 = 0.0;
pub const PLANE_KG_PER_KM: f64 = 0.255;

// -- Diet: kg CO2e per kg of food ---------------------------------------------

pub const BEEF_KG_PER_KG: f64 = 27.0;
pub const LAMB_KG_PER_KG: f64 = 39.2;
pub const PORK_KG_PER_KG: f64 = 12.1;
pub const CHICKEN_KG_PER_KG: f64 = 6.9;
pub const FISH_KG_PER_KG: f64 = 6.1;
pub const VEGETARIAN_KG_PER_KG: f64 = 2.0;
pub const VEGAN_KG_PER_KG: f64 = 1.5;

/// Mass of one meal portion in grams.
pub const GRAMS_PER_PORTION: f64 = 200.0;

// -- Electricity --------------------------------------------------------------

/// Grid carbon intensity, kg CO2e per kWh (India grid average).
pub const GRID_CO2_KG_PER_KWH: f64 = 0.82;

/// Tariff in currency units per kWh.
pub const RATE_PER_KWH: f64 = 9.0;

// -- Appliances: typical daily consumption in kWh ------------------------------

pub const AIR_CONDITIONER_DAILY_KWH: f64 = 8.5;
pub const WATER_HEATER_DAILY_KWH: f64 = 3.2;
pub const REFRIGERATOR_DAILY_KWH: f64 = 2.8;
pub const WASHING_MACHINE_DAILY_KWH: f64 = 1.5;
pub const LIGHTING_DAILY_KWH: f64 = 1.2;
pub const OTHER_APPLIANCE_DAILY_KWH: f64 = 1.8;

// -- Pass-through domains -----------------------------------------------------

/// Water and waste entries are already in their target unit.
pub const IDENTITY_FACTOR: f64 = 1.0;
