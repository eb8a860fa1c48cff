//! Append-only impact log, time windows, and budget aggregation.
//!
//! Aggregates are never stored: every read sums the matching entries again.
//! The sum uses Neumaier compensation so that any permutation of the same
//! entries produces the same total to within a few ulps.

use bevy::prelude::*;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{usage_tier, EcoTier};
use crate::converters::{compute_impact_with, ConversionParams};
use crate::error::ImpactError;
use crate::factors::{ImpactCategory, ImpactDomain};

// =============================================================================
// Entries
// =============================================================================

/// One logged activity with its computed impact. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEntry {
    /// Session-unique, strictly increasing.
    pub id: u64,
    pub category: ImpactCategory,
    /// Raw quantity as entered (km, portions, kWh, L, kg).
    pub quantity: f64,
    /// Impact in the category's domain unit.
    pub computed_impact: f64,
    pub timestamp: DateTime<Utc>,
    /// Free-text note, e.g. the activity name typed by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ImpactEntry {
    pub fn domain(&self) -> ImpactDomain {
        self.category.domain()
    }
}

/// Append-only list of entries for the current session.
///
/// Entries can only be added through [`ImpactLog::record`], which runs the
/// converter first; an invalid submission never reaches the log.
#[derive(Resource, Debug, Clone, Default, Serialize)]
pub struct ImpactLog {
    entries: Vec<ImpactEntry>,
    next_id: u64,
}

impl ImpactLog {
    /// Convert and append one submission. Returns the stored entry.
    pub fn record(
        &mut self,
        params: &ConversionParams,
        category: ImpactCategory,
        quantity: f64,
        label: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<&ImpactEntry, ImpactError> {
        let computed_impact = compute_impact_with(params, category, quantity)?;
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(ImpactEntry {
            id,
            category,
            quantity,
            computed_impact,
            timestamp,
            label: label.filter(|l| !l.trim().is_empty()),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn entries(&self) -> &[ImpactEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ImpactEntry> {
        self.entries.last()
    }

    /// Sum of one domain's impact inside `window`.
    pub fn total(&self, domain: ImpactDomain, window: &TimeWindow) -> f64 {
        aggregate_window(&self.entries, domain, window)
    }
}

// =============================================================================
// Time windows
// =============================================================================

/// Calendar window used to filter entries (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeWindow {
    All,
    Day { date: NaiveDate },
    IsoWeek { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    /// Half-open `[start, end)`.
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl TimeWindow {
    pub fn day_of(ts: DateTime<Utc>) -> Self {
        TimeWindow::Day {
            date: ts.date_naive(),
        }
    }

    pub fn week_of(ts: DateTime<Utc>) -> Self {
        let week = ts.iso_week();
        TimeWindow::IsoWeek {
            year: week.year(),
            week: week.week(),
        }
    }

    pub fn month_of(ts: DateTime<Utc>) -> Self {
        TimeWindow::Month {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        match *self {
            TimeWindow::All => true,
            TimeWindow::Day { date } => ts.date_naive() == date,
            TimeWindow::IsoWeek { year, week } => {
                let w = ts.iso_week();
                w.year() == year && w.week() == week
            }
            TimeWindow::Month { year, month } => ts.year() == year && ts.month() == month,
            TimeWindow::Range { start, end } => *ts >= start && *ts < end,
        }
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Compensated (Neumaier) sum.
pub fn compensated_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

/// Sum `computed_impact` over entries accepted by `predicate`.
pub fn aggregate<P>(entries: &[ImpactEntry], predicate: P) -> f64
where
    P: Fn(&ImpactEntry) -> bool,
{
    compensated_sum(
        entries
            .iter()
            .filter(|e| predicate(e))
            .map(|e| e.computed_impact),
    )
}

/// Sum one domain's impact inside a calendar window.
pub fn aggregate_window(entries: &[ImpactEntry], domain: ImpactDomain, window: &TimeWindow) -> f64 {
    aggregate(entries, |e| e.domain() == domain && window.contains(&e.timestamp))
}

/// `100 * aggregate / limit`. The limit must be finite and `> 0`.
pub fn percent_used(aggregate: f64, limit: f64) -> Result<f64, ImpactError> {
    validate_limit(limit)?;
    Ok(100.0 * aggregate / limit)
}

pub fn validate_limit(limit: f64) -> Result<f64, ImpactError> {
    if !limit.is_finite() || limit <= 0.0 {
        return Err(ImpactError::invalid("limit", limit, "must be a finite number > 0"));
    }
    Ok(limit)
}

/// Usage of one budget. Reaching or exceeding the limit is reported, never
/// prevented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub used: f64,
    pub limit: f64,
    pub percent: f64,
    /// `percent` capped at 100, for progress bars.
    pub fill_percent: f64,
    /// `limit - used`, floored at 0.
    pub remaining: f64,
    pub tier: EcoTier,
}

impl BudgetStatus {
    pub fn new(used: f64, limit: f64) -> Result<Self, ImpactError> {
        let percent = percent_used(used, limit)?;
        Ok(Self {
            used,
            limit,
            percent,
            fill_percent: percent.clamp(0.0, 100.0),
            remaining: (limit - used).max(0.0),
            tier: usage_tier(percent),
        })
    }

    pub fn exceeded(&self) -> bool {
        self.used > self.limit
    }
}

/// One category's slice of a total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: ImpactCategory,
    pub total: f64,
    /// Share of the grand total, 0 when the grand total is 0.
    pub percent: f64,
}

/// Per-category totals over entries accepted by `predicate`, largest first
/// (ties keep category table order).
pub fn breakdown<P>(entries: &[ImpactEntry], predicate: P) -> Vec<CategoryShare>
where
    P: Fn(&ImpactEntry) -> bool,
{
    let mut categories: Vec<ImpactCategory> = entries
        .iter()
        .filter(|e| predicate(e))
        .map(|e| e.category)
        .collect();
    categories.sort();
    categories.dedup();

    let grand_total = aggregate(entries, &predicate);
    let mut shares: Vec<CategoryShare> = categories
        .into_iter()
        .map(|category| {
            let total = aggregate(entries, |e| e.category == category && predicate(e));
            let percent = if grand_total > 0.0 {
                100.0 * total / grand_total
            } else {
                0.0
            };
            CategoryShare {
                category,
                total,
                percent,
            }
        })
        .collect();
    shares.sort_by(|a, b| b.total.total_cmp(&a.total).then(a.category.cmp(&b.category)));
    shares
}

// =============================================================================
// Unit tests
// =============================================================================
