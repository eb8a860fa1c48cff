//! Daily carbon footprint summary.
//!
//! A day's footprint has four sources:
//!
//! | Source      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | Transport   | transport entries of the day                        |
//! | Food        | diet entries of the day                             |
//! | Home energy | electricity and appliance entries + fixed baseline  |
//! | Shopping    | fixed baseline                                      |
//!
//! The total is compared against the daily carbon limit. Two tiers are
//! reported: one for the absolute total (< 2 kg green, < 3 kg yellow) and one
//! for the share of the limit used (< 50 % green, < 75 % yellow).

use bevy::prelude::*;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, BudgetStatus, ImpactEntry};
use crate::classify::{carbon_total_tier, EcoTier};
use crate::config::EstimatorConfig;
use crate::error::ImpactError;
use crate::factors::ImpactCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbonSource {
    Transport,
    Food,
    HomeEnergy,
    Shopping,
}

impl CarbonSource {
    pub const ALL: [CarbonSource; 4] = [
        CarbonSource::Transport,
        CarbonSource::Food,
        CarbonSource::HomeEnergy,
        CarbonSource::Shopping,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CarbonSource::Transport => "Transport",
            CarbonSource::Food => "Food",
            CarbonSource::HomeEnergy => "Home Energy",
            CarbonSource::Shopping => "Shopping",
        }
    }

    /// Which source a logged category feeds. `None` for water and waste.
    pub fn of(category: ImpactCategory) -> Option<Self> {
        match category {
            ImpactCategory::Transport(_) => Some(CarbonSource::Transport),
            ImpactCategory::Diet(_) => Some(CarbonSource::Food),
            ImpactCategory::Electricity | ImpactCategory::Appliance(_) => {
                Some(CarbonSource::HomeEnergy)
            }
            ImpactCategory::Water(_) | ImpactCategory::Waste(_) => None,
        }
    }
}

/// Carbon footprint of one calendar day.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonSummary {
    pub date: NaiveDate,
    pub transport_kg: f64,
    pub food_kg: f64,
    /// Logged home energy plus the home baseline.
    pub home_energy_kg: f64,
    pub shopping_kg: f64,
    pub total_kg: f64,
    pub budget: BudgetStatus,
    /// Tier of the absolute total.
    pub total_tier: EcoTier,
}

impl CarbonSummary {
    pub fn source_kg(&self, source: CarbonSource) -> f64 {
        match source {
            CarbonSource::Transport => self.transport_kg,
            CarbonSource::Food => self.food_kg,
            CarbonSource::HomeEnergy => self.home_energy_kg,
            CarbonSource::Shopping => self.shopping_kg,
        }
    }

    /// `(source, kg)` pairs in display order.
    pub fn sources(&self) -> Vec<(CarbonSource, f64)> {
        CarbonSource::ALL
            .iter()
            .map(|s| (*s, self.source_kg(*s)))
            .collect()
    }

    /// Tier of the share of the daily limit used.
    pub fn progress_tier(&self) -> EcoTier {
        self.budget.tier
    }
}

impl Default for CarbonSummary {
    fn default() -> Self {
        let config = EstimatorConfig::default();
        let baseline = config.baselines.home_energy_kg + config.baselines.shopping_kg;
        let limit = config.limits.daily_carbon_kg;
        let percent = 100.0 * baseline / limit;
        Self {
            date: NaiveDate::default(),
            transport_kg: 0.0,
            food_kg: 0.0,
            home_energy_kg: config.baselines.home_energy_kg,
            shopping_kg: config.baselines.shopping_kg,
            total_kg: baseline,
            budget: BudgetStatus {
                used: baseline,
                limit,
                percent,
                fill_percent: percent.min(100.0),
                remaining: (limit - baseline).max(0.0),
                tier: crate::classify::usage_tier(percent),
            },
            total_tier: carbon_total_tier(baseline),
        }
    }
}

fn day_total(entries: &[ImpactEntry], day: NaiveDate, source: CarbonSource) -> f64 {
    aggregate(entries, |e| {
        e.timestamp.date_naive() == day && CarbonSource::of(e.category) == Some(source)
    })
}

/// Summarize the carbon footprint of `day`.
pub fn summarize_carbon(
    entries: &[ImpactEntry],
    day: NaiveDate,
    config: &EstimatorConfig,
) -> Result<CarbonSummary, ImpactError> {
    let transport_kg = day_total(entries, day, CarbonSource::Transport);
    let food_kg = day_total(entries, day, CarbonSource::Food);
    let home_energy_kg =
        day_total(entries, day, CarbonSource::HomeEnergy) + config.baselines.home_energy_kg;
    let shopping_kg = config.baselines.shopping_kg;
    let total_kg = transport_kg + food_kg + home_energy_kg + shopping_kg;

    Ok(CarbonSummary {
        date: day,
        transport_kg,
        food_kg,
        home_energy_kg,
        shopping_kg,
        total_kg,
        budget: BudgetStatus::new(total_kg, config.limits.daily_carbon_kg)?,
        total_tier: carbon_total_tier(total_kg),
    })
}

/// One bar of the weekly chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCarbon {
    pub date: NaiveDate,
    pub total_kg: f64,
    pub tier: EcoTier,
}

/// Daily totals for Monday..Sunday of the ISO week containing `day`.
pub fn weekly_carbon(
    entries: &[ImpactEntry],
    day: NaiveDate,
    config: &EstimatorConfig,
) -> Result<Vec<DailyCarbon>, ImpactError> {
    let monday = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let summary = summarize_carbon(entries, date, config)?;
            Ok(DailyCarbon {
                date,
                total_kg: summary.total_kg,
                tier: summary.total_tier,
            })
        })
        .collect()
}
