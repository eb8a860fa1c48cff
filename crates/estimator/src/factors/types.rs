//! Closed category enums, impact domains and the `EmissionFactor` record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ImpactError;

use super::constants::*;

// =============================================================================
// Transport
// =============================================================================

/// Vehicle used for a logged trip.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Motorcycle,
    Bus,
    Train,
    Bicycle,
    Walking,
    Plane,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 7] = [
        VehicleKind::Car,
        VehicleKind::Motorcycle,
        VehicleKind::Bus,
        VehicleKind::Train,
        VehicleKind::Bicycle,
        VehicleKind::Walking,
        VehicleKind::Plane,
    ];

    /// kg CO2e emitted per km travelled.
    pub fn kg_co2_per_km(self) -> f64 {
        match self {
            VehicleKind::Car => CAR_KG_PER_KM,
            VehicleKind::Motorcycle => MOTORCYCLE_KG_PER_KM,
            VehicleKind::Bus => BUS_KG_PER_KM,
            VehicleKind::Train => TRAIN_KG_PER_KM,
            VehicleKind::Bicycle => BICYCLE_KG_PER_KM,
            VehicleKind::Walking => WALKING_KG_PER_KM,
            VehicleKind::Plane => PLANE_KG_PER_KM,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Motorcycle => "motorcycle",
            VehicleKind::Bus => "bus",
            VehicleKind::Train => "train",
            VehicleKind::Bicycle => "bicycle",
            VehicleKind::Walking => "walking",
            VehicleKind::Plane => "plane",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Motorcycle => "Motorcycle",
            VehicleKind::Bus => "Bus",
            VehicleKind::Train => "Train",
            VehicleKind::Bicycle => "Bicycle",
            VehicleKind::Walking => "Walking",
            VehicleKind::Plane => "Plane",
        }
    }
}

// =============================================================================
// Diet
// =============================================================================

/// Main component of a logged meal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MealKind {
    Beef,
    Lamb,
    Pork,
    Chicken,
    Fish,
    Vegetarian,
    Vegan,
}

impl MealKind {
    pub const ALL: [MealKind; 7] = [
        MealKind::Beef,
        MealKind::Lamb,
        MealKind::Pork,
        MealKind::Chicken,
        MealKind::Fish,
        MealKind::Vegetarian,
        MealKind::Vegan,
    ];

    /// kg CO2e per kg of food.
    pub fn kg_co2_per_kg(self) -> f64 {
        match self {
            MealKind::Beef => BEEF_KG_PER_KG,
            MealKind::Lamb => LAMB_KG_PER_KG,
            MealKind::Pork => PORK_KG_PER_KG,
            MealKind::Chicken => CHICKEN_KG_PER_KG,
            MealKind::Fish => FISH_KG_PER_KG,
            MealKind::Vegetarian => VEGETARIAN_KG_PER_KG,
            MealKind::Vegan => VEGAN_KG_PER_KG,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MealKind::Beef => "beef",
            MealKind::Lamb => "lamb",
            MealKind::Pork => "pork",
            MealKind::Chicken => "chicken",
            MealKind::Fish => "fish",
            MealKind::Vegetarian => "vegetarian",
            MealKind::Vegan => "vegan",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MealKind::Beef => "Beef",
            MealKind::Lamb => "Lamb",
            MealKind::Pork => "Pork",
            MealKind::Chicken => "Chicken",
            MealKind::Fish => "Fish",
            MealKind::Vegetarian => "Vegetarian",
            MealKind::Vegan => "Vegan",
        }
    }
}

// =============================================================================
// Appliances
// =============================================================================

/// Household appliance whose consumption is logged in kWh.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceKind {
    AirConditioner,
    WaterHeater,
    Refrigerator,
    WashingMachine,
    Lighting,
    Other,
}

impl ApplianceKind {
    pub const ALL: [ApplianceKind; 6] = [
        ApplianceKind::AirConditioner,
        ApplianceKind::WaterHeater,
        ApplianceKind::Refrigerator,
        ApplianceKind::WashingMachine,
        ApplianceKind::Lighting,
        ApplianceKind::Other,
    ];

    /// Typical daily consumption used for the household breakdown.
    pub fn typical_daily_kwh(self) -> f64 {
        match self {
            ApplianceKind::AirConditioner => AIR_CONDITIONER_DAILY_KWH,
            ApplianceKind::WaterHeater => WATER_HEATER_DAILY_KWH,
            ApplianceKind::Refrigerator => REFRIGERATOR_DAILY_KWH,
            ApplianceKind::WashingMachine => WASHING_MACHINE_DAILY_KWH,
            ApplianceKind::Lighting => LIGHTING_DAILY_KWH,
            ApplianceKind::Other => OTHER_APPLIANCE_DAILY_KWH,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ApplianceKind::AirConditioner => "air_conditioner",
            ApplianceKind::WaterHeater => "water_heater",
            ApplianceKind::Refrigerator => "refrigerator",
            ApplianceKind::WashingMachine => "washing_machine",
            ApplianceKind::Lighting => "lighting",
            ApplianceKind::Other => "other_appliance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ApplianceKind::AirConditioner => "Air Conditioner",
            ApplianceKind::WaterHeater => "Water Heater",
            ApplianceKind::Refrigerator => "Refrigerator",
            ApplianceKind::WashingMachine => "Washing Machine",
            ApplianceKind::Lighting => "Lighting",
            ApplianceKind::Other => "Others",
        }
    }
}

// =============================================================================
// Water
// =============================================================================

/// Household water use, logged in liters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WaterUse {
    Shower,
    Bath,
    Dishes,
    Laundry,
    Cooking,
    Drinking,
    Gardening,
    Cleaning,
}

impl WaterUse {
    pub const ALL: [WaterUse; 8] = [
        WaterUse::Shower,
        WaterUse::Bath,
        WaterUse::Dishes,
        WaterUse::Laundry,
        WaterUse::Cooking,
        WaterUse::Drinking,
        WaterUse::Gardening,
        WaterUse::Cleaning,
    ];

    pub fn key(self) -> &'static str {
        match self {
            WaterUse::Shower => "shower",
            WaterUse::Bath => "bath",
            WaterUse::Dishes => "dishes",
            WaterUse::Laundry => "laundry",
            WaterUse::Cooking => "cooking",
            WaterUse::Drinking => "drinking",
            WaterUse::Gardening => "gardening",
            WaterUse::Cleaning => "cleaning",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WaterUse::Shower => "Shower",
            WaterUse::Bath => "Bath",
            WaterUse::Dishes => "Dishes",
            WaterUse::Laundry => "Laundry",
            WaterUse::Cooking => "Cooking",
            WaterUse::Drinking => "Drinking",
            WaterUse::Gardening => "Gardening",
            WaterUse::Cleaning => "Cleaning",
        }
    }
}

// =============================================================================
// Waste
// =============================================================================

/// Sorting stream for household waste, logged in kg.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WasteStream {
    Recyclable,
    Organic,
    NonRecyclable,
}

impl WasteStream {
    pub const ALL: [WasteStream; 3] = [
        WasteStream::Recyclable,
        WasteStream::Organic,
        WasteStream::NonRecyclable,
    ];

    pub fn key(self) -> &'static str {
        match self {
            WasteStream::Recyclable => "recyclable",
            WasteStream::Organic => "organic",
            WasteStream::NonRecyclable => "non_recyclable",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WasteStream::Recyclable => "Recyclable",
            WasteStream::Organic => "Wet/Organic",
            WasteStream::NonRecyclable => "Non-Recyclable",
        }
    }
}

// =============================================================================
// Domains
// =============================================================================

/// The tracked quantity an impact value is expressed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDomain {
    /// kg CO2e.
    Carbon,
    /// Liters of water.
    Water,
    /// kg of waste.
    Waste,
}

impl ImpactDomain {
    pub fn unit(self) -> &'static str {
        match self {
            ImpactDomain::Carbon => "kg CO2e",
            ImpactDomain::Water => "L",
            ImpactDomain::Waste => "kg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImpactDomain::Carbon => "Carbon",
            ImpactDomain::Water => "Water",
            ImpactDomain::Waste => "Waste",
        }
    }
}

// =============================================================================
// ImpactCategory
// =============================================================================

/// Every activity the estimator can convert into an impact.
///
/// Serialized as its `domain.kind` key (e.g. `"transport.car"`), so the JSON
/// boundary goes through the same lookup as every other string key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum ImpactCategory {
    /// Quantity: km travelled.
    Transport(VehicleKind),
    /// Quantity: portions eaten.
    Diet(MealKind),
    /// Quantity: kWh drawn from the grid.
    Electricity,
    /// Quantity: kWh consumed by one appliance.
    Appliance(ApplianceKind),
    /// Quantity: liters used.
    Water(WaterUse),
    /// Quantity: kg discarded.
    Waste(WasteStream),
}

impl ImpactCategory {
    /// Every category, in table order.
    pub fn all() -> impl Iterator<Item = ImpactCategory> {
        VehicleKind::ALL
            .into_iter()
            .map(ImpactCategory::Transport)
            .chain(MealKind::ALL.into_iter().map(ImpactCategory::Diet))
            .chain(std::iter::once(ImpactCategory::Electricity))
            .chain(ApplianceKind::ALL.into_iter().map(ImpactCategory::Appliance))
            .chain(WaterUse::ALL.into_iter().map(ImpactCategory::Water))
            .chain(WasteStream::ALL.into_iter().map(ImpactCategory::Waste))
    }

    pub fn domain(self) -> ImpactDomain {
        match self {
            ImpactCategory::Transport(_)
            | ImpactCategory::Diet(_)
            | ImpactCategory::Electricity
            | ImpactCategory::Appliance(_) => ImpactDomain::Carbon,
            ImpactCategory::Water(_) => ImpactDomain::Water,
            ImpactCategory::Waste(_) => ImpactDomain::Waste,
        }
    }

    /// Prefix used in qualified keys.
    pub fn domain_key(self) -> &'static str {
        match self {
            ImpactCategory::Transport(_) => "transport",
            ImpactCategory::Diet(_) => "diet",
            ImpactCategory::Electricity => "electricity",
            ImpactCategory::Appliance(_) => "appliance",
            ImpactCategory::Water(_) => "water",
            ImpactCategory::Waste(_) => "waste",
        }
    }

    /// Unqualified kind name, unique across all domains.
    pub fn kind_key(self) -> &'static str {
        match self {
            ImpactCategory::Transport(v) => v.key(),
            ImpactCategory::Diet(m) => m.key(),
            ImpactCategory::Electricity => "grid",
            ImpactCategory::Appliance(a) => a.key(),
            ImpactCategory::Water(w) => w.key(),
            ImpactCategory::Waste(s) => s.key(),
        }
    }

    /// Qualified key, e.g. `transport.car` or `electricity`.
    pub fn key(self) -> String {
        match self {
            ImpactCategory::Electricity => "electricity".to_string(),
            other => format!("{}.{}", other.domain_key(), other.kind_key()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImpactCategory::Transport(v) => v.label(),
            ImpactCategory::Diet(m) => m.label(),
            ImpactCategory::Electricity => "Grid electricity",
            ImpactCategory::Appliance(a) => a.label(),
            ImpactCategory::Water(w) => w.label(),
            ImpactCategory::Waste(s) => s.label(),
        }
    }
}

impl fmt::Display for ImpactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for ImpactCategory {
    type Err = ImpactError;

    /// Accepts qualified keys (`diet.chicken`), bare kind names (`chicken`)
    /// and the domain alias `electricity`. Matching ignores ASCII case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "electricity" {
            return Ok(ImpactCategory::Electricity);
        }
        let found = match wanted.split_once('.') {
            Some((domain, kind)) => ImpactCategory::all()
                .find(|c| c.domain_key() == domain && c.kind_key() == kind),
            None => ImpactCategory::all().find(|c| c.kind_key() == wanted),
        };
        found.ok_or_else(|| ImpactError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for ImpactCategory {
    type Error = ImpactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImpactCategory> for String {
    fn from(category: ImpactCategory) -> Self {
        category.key()
    }
}

// =============================================================================
// EmissionFactor
// =============================================================================

/// Per-unit conversion factor for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionFactor {
    pub category: ImpactCategory,
    /// Impact produced per `unit` of activity.
    pub factor_per_unit: f64,
    /// Activity unit the factor is expressed against (`km`, `kg`, `kWh`, `L`).
    pub unit: &'static str,
}

impl EmissionFactor {
    /// Exhaustive factor table: every category has exactly one factor.
    pub fn for_category(category: ImpactCategory) -> Self {
        let (factor_per_unit, unit) = match category {
            ImpactCategory::Transport(v) => (v.kg_co2_per_km(), "km"),
            ImpactCategory::Diet(m) => (m.kg_co2_per_kg(), "kg"),
            ImpactCategory::Electricity | ImpactCategory::Appliance(_) => {
                (GRID_CO2_KG_PER_KWH, "kWh")
            }
            ImpactCategory::Water(_) => (IDENTITY_FACTOR, "L"),
            ImpactCategory::Waste(_) => (IDENTITY_FACTOR, "kg"),
        };
        Self {
            category,
            factor_per_unit,
            unit,
        }
    }

    /// Unit of the impact this factor produces.
    pub fn impact_unit(&self) -> &'static str {
        self.category.domain().unit()
    }
}
