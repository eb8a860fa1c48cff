//! Household electricity: monthly readings, bill budget and appliance split.
//!
//! Each reading is converted with the tariff (`bill = units * rate`,
//! `carbon = units * grid factor`) and kept per calendar month. Entering a
//! month twice replaces the earlier reading.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::BudgetStatus;
use crate::converters::{estimate_electricity, Tariff};
use crate::error::ImpactError;
use crate::factors::ApplianceKind;

// =============================================================================
// YearMonth
// =============================================================================

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ImpactError> {
        if !(1..=12).contains(&month) {
            return Err(ImpactError::invalid("month", f64::from(month), "must be in 1..=12"));
        }
        Ok(Self { year, month })
    }

    pub fn of(ts: DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ImpactError::invalid_text("month", s, "expected YYYY-MM");
        let (year, month) = s.trim().split_once('-').ok_or_else(bad)?;
        let year: i32 = year.parse().map_err(|_| bad())?;
        let month: u32 = month.parse().map_err(|_| bad())?;
        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ImpactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

// =============================================================================
// History
// =============================================================================

/// One month's reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    pub month: YearMonth,
    /// kWh.
    pub units: f64,
    pub bill: f64,
    pub carbon_kg: f64,
}

/// Monthly readings, ordered by month, at most one per month.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectricityHistory {
    months: Vec<MonthlyUsage>,
}

impl ElectricityHistory {
    /// Convert and store a reading, replacing any earlier one for `month`.
    pub fn record(
        &mut self,
        month: YearMonth,
        units: f64,
        tariff: &Tariff,
    ) -> Result<MonthlyUsage, ImpactError> {
        let estimate = estimate_electricity(units, tariff)?;
        let usage = MonthlyUsage {
            month,
            units: estimate.units,
            bill: estimate.bill,
            carbon_kg: estimate.carbon_kg,
        };
        match self.months.binary_search_by(|m| m.month.cmp(&month)) {
            Ok(i) => self.months[i] = usage,
            Err(i) => self.months.insert(i, usage),
        }
        Ok(usage)
    }

    pub fn months(&self) -> &[MonthlyUsage] {
        &self.months
    }

    pub fn get(&self, month: YearMonth) -> Option<&MonthlyUsage> {
        self.months.iter().find(|m| m.month == month)
    }

    pub fn latest(&self) -> Option<&MonthlyUsage> {
        self.months.last()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Mean kWh per recorded month, rounded to a whole number. 0 when empty.
    pub fn monthly_average_units(&self) -> f64 {
        if self.months.is_empty() {
            return 0.0;
        }
        let total: f64 = self.months.iter().map(|m| m.units).sum();
        (total / self.months.len() as f64).round()
    }

    /// Carbon of an average month.
    pub fn average_monthly_carbon_kg(&self, tariff: &Tariff) -> f64 {
        self.monthly_average_units() * tariff.grid_co2_kg_per_kwh
    }

    /// The month's bill against the monthly budget. `None` if not recorded.
    pub fn bill_status(
        &self,
        month: YearMonth,
        budget: f64,
    ) -> Result<Option<BudgetStatus>, ImpactError> {
        match self.get(month) {
            Some(usage) => BudgetStatus::new(usage.bill, budget).map(Some),
            None => Ok(None),
        }
    }

    pub fn overview(&self, tariff: &Tariff, budget: f64) -> Result<ElectricityOverview, ImpactError> {
        let latest_bill = match self.latest() {
            Some(usage) => Some(BudgetStatus::new(usage.bill, budget)?),
            None => None,
        };
        Ok(ElectricityOverview {
            months: self.months.clone(),
            monthly_average_units: self.monthly_average_units(),
            average_monthly_carbon_kg: self.average_monthly_carbon_kg(tariff),
            monthly_budget: budget,
            latest_bill,
        })
    }
}

/// Snapshot for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricityOverview {
    pub months: Vec<MonthlyUsage>,
    pub monthly_average_units: f64,
    pub average_monthly_carbon_kg: f64,
    pub monthly_budget: f64,
    pub latest_bill: Option<BudgetStatus>,
}

// =============================================================================
// Appliances
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplianceUsage {
    pub appliance: ApplianceKind,
    pub daily_kwh: f64,
    pub carbon_kg: f64,
    pub percent: f64,
}

/// Typical daily consumption per appliance, largest first.
pub fn typical_appliance_breakdown(tariff: &Tariff) -> Vec<ApplianceUsage> {
    let total: f64 = ApplianceKind::ALL.iter().map(|a| a.typical_daily_kwh()).sum();
    let mut rows: Vec<ApplianceUsage> = ApplianceKind::ALL
        .iter()
        .map(|&appliance| {
            let daily_kwh = appliance.typical_daily_kwh();
            ApplianceUsage {
                appliance,
                daily_kwh,
                carbon_kg: daily_kwh * tariff.grid_co2_kg_per_kwh,
                percent: 100.0 * daily_kwh / total,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.daily_kwh.total_cmp(&a.daily_kwh));
    rows
}
