//! Constants for the route comparator.

// =============================================================================
// Per-mode profiles (CO2 g/km, cost/km, speed km/h)
// =============================================================================

pub const CAR_CO2_G_PER_KM: f64 = 120.0;
pub const CAR_COST_PER_KM: f64 = 12.0;
pub const CAR_SPEED_KMH: f64 = 25.0;

pub const BUS_CO2_G_PER_KM: f64 = 45.0;
pub const BUS_COST_PER_KM: f64 = 2.0;
pub const BUS_SPEED_KMH: f64 = 18.0;

pub const METRO_CO2_G_PER_KM: f64 = 30.0;
pub const METRO_COST_PER_KM: f64 = 3.0;
pub const METRO_SPEED_KMH: f64 = 35.0;

pub const BICYCLE_CO2_G_PER_KM: f64 = 0.0;
pub const BICYCLE_COST_PER_KM: f64 = 0.0;
pub const BICYCLE_SPEED_KMH: f64 = 15.0;

pub const WALKING_CO2_G_PER_KM: f64 = 0.0;
pub const WALKING_COST_PER_KM: f64 = 0.0;
pub const WALKING_SPEED_KMH: f64 = 5.0;

// =============================================================================
// Eco score
// =============================================================================

pub const MAX_ECO_SCORE: i64 = 10;
pub const MIN_ECO_SCORE: i64 = 1;

/// Each full step of this many g CO2/km costs one score point.
pub const SCORE_STEP_G_PER_KM: f64 = 15.0;

/// Trips longer than this (minutes) are penalized and cannot be recommended.
pub const PRACTICAL_TRIP_MINUTES: u64 = 60;

/// Score points lost by a trip longer than [`PRACTICAL_TRIP_MINUTES`].
pub const SLOW_TRIP_PENALTY: i64 = 2;
