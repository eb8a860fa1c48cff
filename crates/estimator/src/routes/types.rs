//! Route mode types and comparison results.

use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::classify::{route_score_tier, EcoTier};

// =============================================================================
// RouteMode
// =============================================================================

/// Ways to make a trip between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMode {
    Car,
    Bus,
    Metro,
    Bicycle,
    Walking,
}

impl RouteMode {
    /// Every mode, in the order a full comparison lists them.
    pub const ALL: [RouteMode; 5] = [
        RouteMode::Car,
        RouteMode::Bus,
        RouteMode::Metro,
        RouteMode::Bicycle,
        RouteMode::Walking,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RouteMode::Car => "car",
            RouteMode::Bus => "bus",
            RouteMode::Metro => "metro",
            RouteMode::Bicycle => "bicycle",
            RouteMode::Walking => "walking",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RouteMode::Car => "Car",
            RouteMode::Bus => "Bus",
            RouteMode::Metro => "Metro",
            RouteMode::Bicycle => "Bicycle",
            RouteMode::Walking => "Walking",
        }
    }

    /// Built-in emission, cost and speed figures for this mode.
    pub fn profile(self) -> ModeProfile {
        match self {
            RouteMode::Car => ModeProfile::new(CAR_CO2_G_PER_KM, CAR_COST_PER_KM, CAR_SPEED_KMH),
            RouteMode::Bus => ModeProfile::new(BUS_CO2_G_PER_KM, BUS_COST_PER_KM, BUS_SPEED_KMH),
            RouteMode::Metro => {
                ModeProfile::new(METRO_CO2_G_PER_KM, METRO_COST_PER_KM, METRO_SPEED_KMH)
            }
            RouteMode::Bicycle => {
                ModeProfile::new(BICYCLE_CO2_G_PER_KM, BICYCLE_COST_PER_KM, BICYCLE_SPEED_KMH)
            }
            RouteMode::Walking => {
                ModeProfile::new(WALKING_CO2_G_PER_KM, WALKING_COST_PER_KM, WALKING_SPEED_KMH)
            }
        }
    }
}

impl std::fmt::Display for RouteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// ModeProfile
// =============================================================================

/// Per-km figures for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    pub co2_g_per_km: f64,
    pub cost_per_km: f64,
    pub speed_kmh: f64,
}

impl ModeProfile {
    pub const fn new(co2_g_per_km: f64, cost_per_km: f64, speed_kmh: f64) -> Self {
        Self {
            co2_g_per_km,
            cost_per_km,
            speed_kmh,
        }
    }
}

// =============================================================================
// RouteOption / RouteComparison
// =============================================================================

/// One mode evaluated over a concrete distance. Figures are rounded to whole
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOption {
    pub mode: RouteMode,
    pub co2_grams: u64,
    pub cost: u64,
    pub time_minutes: u64,
    /// Eco score in 1..=10.
    pub score: u8,
    pub recommended: bool,
}

impl RouteOption {
    pub fn tier(&self) -> EcoTier {
        route_score_tier(self.score)
    }

    /// Trip fits within [`PRACTICAL_TRIP_MINUTES`].
    pub fn is_practical(&self) -> bool {
        self.time_minutes <= PRACTICAL_TRIP_MINUTES
    }
}

/// Result of comparing modes over one distance.
///
/// Options keep the order the modes were requested in. Exactly one option
/// has `recommended == true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteComparison {
    pub distance_km: f64,
    pub options: Vec<RouteOption>,
}

impl RouteComparison {
    pub fn recommended(&self) -> Option<&RouteOption> {
        self.options.iter().find(|o| o.recommended)
    }

    /// Options by score descending, then cost ascending.
    pub fn ranked(&self) -> Vec<RouteOption> {
        let mut ranked = self.options.clone();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.cost.cmp(&b.cost)));
        ranked
    }

    pub fn option(&self, mode: RouteMode) -> Option<&RouteOption> {
        self.options.iter().find(|o| o.mode == mode)
    }

    /// Grams of CO2 saved by taking `greener` instead of `baseline`, floored
    /// at zero. `None` when either mode was not compared.
    pub fn co2_savings_grams(&self, baseline: RouteMode, greener: RouteMode) -> Option<u64> {
        let base = self.option(baseline)?;
        let green = self.option(greener)?;
        Some(base.co2_grams.saturating_sub(green.co2_grams))
    }
}
