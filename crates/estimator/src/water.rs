//! Daily water usage summary.

use bevy::prelude::*;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, BudgetStatus, ImpactEntry};
use crate::config::EstimatorConfig;
use crate::error::ImpactError;
use crate::factors::{ImpactCategory, WaterUse};

/// Liters used by one kind of activity during the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterShare {
    pub use_kind: WaterUse,
    pub liters: f64,
    /// Share of the day's total, 0 when nothing was used.
    pub percent: f64,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSummary {
    pub date: NaiveDate,
    pub budget: BudgetStatus,
    /// Usage is above the warning share of the daily limit.
    pub approaching_limit: bool,
    /// Largest first.
    pub shares: Vec<WaterShare>,
}

impl WaterSummary {
    pub fn used_liters(&self) -> f64 {
        self.budget.used
    }
}

impl Default for WaterSummary {
    fn default() -> Self {
        let limit = EstimatorConfig::default().limits.daily_water_liters;
        Self {
            date: NaiveDate::default(),
            budget: BudgetStatus {
                used: 0.0,
                limit,
                percent: 0.0,
                fill_percent: 0.0,
                remaining: limit,
                tier: Default::default(),
            },
            approaching_limit: false,
            shares: Vec::new(),
        }
    }
}

fn water_use_of(entry: &ImpactEntry) -> Option<WaterUse> {
    match entry.category {
        ImpactCategory::Water(kind) => Some(kind),
        _ => None,
    }
}

/// Summarize water used on `day`.
pub fn summarize_water(
    entries: &[ImpactEntry],
    day: NaiveDate,
    config: &EstimatorConfig,
) -> Result<WaterSummary, ImpactError> {
    let on_day = |e: &ImpactEntry| e.timestamp.date_naive() == day;
    let used = aggregate(entries, |e| on_day(e) && water_use_of(e).is_some());
    let budget = BudgetStatus::new(used, config.limits.daily_water_liters)?;

    let mut shares: Vec<WaterShare> = WaterUse::ALL
        .iter()
        .filter_map(|&kind| {
            let liters = aggregate(entries, |e| on_day(e) && water_use_of(e) == Some(kind));
            let logged = entries
                .iter()
                .any(|e| on_day(e) && water_use_of(e) == Some(kind));
            logged.then(|| WaterShare {
                use_kind: kind,
                liters,
                percent: if used > 0.0 { 100.0 * liters / used } else { 0.0 },
            })
        })
        .collect();
    // Stable: equal volumes keep table order.
    shares.sort_by(|a, b| b.liters.total_cmp(&a.liters));

    Ok(WaterSummary {
        date: day,
        approaching_limit: budget.percent > config.water_warning_percent,
        budget,
        shares,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ImpactLog;
    use crate::classify::EcoTier;
    use crate::factors::VehicleKind;
    use chrono::{TimeZone, Utc};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    fn log_liters(uses: &[(WaterUse, f64)]) -> ImpactLog {
        let params = EstimatorConfig::default().conversion_params();
        let mut log = ImpactLog::default();
        for (i, (kind, liters)) in uses.iter().enumerate() {
            let ts = Utc.with_ymd_and_hms(2025, 11, 3, 6 + i as u32, 0, 0).unwrap();
            log.record(&params, ImpactCategory::Water(*kind), *liters, None, ts)
                .unwrap();
        }
        log
    }

    #[test]
    fn test_dashboard_day() {
        let log = log_liters(&[
            (WaterUse::Shower, 45.0),
            (WaterUse::Dishes, 25.0),
            (WaterUse::Laundry, 40.0),
            (WaterUse::Cooking, 10.0),
            (WaterUse::Drinking, 5.0),
        ]);
        let summary = summarize_water(log.entries(), day(), &EstimatorConfig::default()).unwrap();
        assert_eq!(summary.used_liters(), 125.0);
        assert!((summary.budget.percent - 62.5).abs() < 1e-12);
        assert!(!summary.approaching_limit);
        assert_eq!(summary.budget.tier, EcoTier::Yellow);

        let order: Vec<WaterUse> = summary.shares.iter().map(|s| s.use_kind).collect();
        assert_eq!(
            order,
            vec![
                WaterUse::Shower,
                WaterUse::Laundry,
                WaterUse::Dishes,
                WaterUse::Cooking,
                WaterUse::Drinking
            ]
        );
        assert!((summary.shares[0].percent - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_use_is_merged() {
        let log = log_liters(&[(WaterUse::Shower, 30.0), (WaterUse::Shower, 20.0)]);
        let summary = summarize_water(log.entries(), day(), &EstimatorConfig::default()).unwrap();
        assert_eq!(summary.shares.len(), 1);
        assert_eq!(summary.shares[0].liters, 50.0);
        assert_eq!(summary.shares[0].percent, 100.0);
    }

    #[test]
    fn test_approaching_limit_is_strictly_above_warning() {
        let at_warning = log_liters(&[(WaterUse::Gardening, 160.0)]);
        let summary =
            summarize_water(at_warning.entries(), day(), &EstimatorConfig::default()).unwrap();
        assert!(!summary.approaching_limit);

        let above = log_liters(&[(WaterUse::Gardening, 161.0)]);
        let summary = summarize_water(above.entries(), day(), &EstimatorConfig::default()).unwrap();
        assert!(summary.approaching_limit);
    }

    #[test]
    fn test_over_limit_fill_is_capped() {
        let log = log_liters(&[(WaterUse::Bath, 150.0), (WaterUse::Laundry, 100.0)]);
        let summary = summarize_water(log.entries(), day(), &EstimatorConfig::default()).unwrap();
        assert!((summary.budget.percent - 125.0).abs() < 1e-12);
        assert_eq!(summary.budget.fill_percent, 100.0);
        assert_eq!(summary.budget.remaining, 0.0);
    }

    #[test]
    fn test_zero_liter_entry_keeps_zero_percent() {
        let log = log_liters(&[(WaterUse::Drinking, 0.0)]);
        let summary = summarize_water(log.entries(), day(), &EstimatorConfig::default()).unwrap();
        assert_eq!(summary.shares.len(), 1);
        assert_eq!(summary.shares[0].percent, 0.0);
    }

    #[test]
    fn test_other_domains_are_ignored() {
        let mut log = log_liters(&[(WaterUse::Shower, 45.0)]);
        log.record(
            &EstimatorConfig::default().conversion_params(),
            ImpactCategory::Transport(VehicleKind::Car),
            100.0,
            None,
            Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap(),
        )
        .unwrap();
        let summary = summarize_water(log.entries(), day(), &EstimatorConfig::default()).unwrap();
        assert_eq!(summary.used_liters(), 45.0);
    }
}
