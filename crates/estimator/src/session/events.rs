use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::ImpactEntry;
use crate::classify::EcoTier;
use crate::electricity::YearMonth;
use crate::error::ImpactError;
use crate::factors::ImpactCategory;

/// A user-entered activity to convert and log.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SubmitImpact {
    pub category: ImpactCategory,
    pub quantity: f64,
    pub label: Option<String>,
    /// Defaults to the session clock's current time.
    pub at: Option<DateTime<Utc>>,
}

impl SubmitImpact {
    pub fn new(category: ImpactCategory, quantity: f64) -> Self {
        Self {
            category,
            quantity,
            label: None,
            at: None,
        }
    }

    /// Resolve a category key such as `"car"` or `"diet.beef"`.
    pub fn parse(key: &str, quantity: f64) -> Result<Self, ImpactError> {
        Ok(Self::new(key.parse()?, quantity))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.at = Some(timestamp);
        self
    }
}

/// A monthly electricity meter reading in kWh.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SubmitElectricityReading {
    /// Defaults to the session clock's current month.
    pub month: Option<YearMonth>,
    pub units: f64,
}

/// Fired once per submission that reached the log.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ImpactRecorded {
    pub entry: ImpactEntry,
}

/// The budget a band change refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetKind {
    DailyCarbon,
    DailyWater,
    MonthlyElectricity,
}

impl BudgetKind {
    pub fn label(self) -> &'static str {
        match self {
            BudgetKind::DailyCarbon => "Daily carbon",
            BudgetKind::DailyWater => "Daily water",
            BudgetKind::MonthlyElectricity => "Monthly electricity bill",
        }
    }
}

/// Fired when a budget's usage tier changes.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BudgetBandChanged {
    pub domain: BudgetKind,
    pub tier: EcoTier,
    pub percent: f64,
}
