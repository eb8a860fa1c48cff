//! Threshold classifier: scalar value -> qualitative band.
//!
//! A [`ThresholdTable`] is an ordered, non-empty list of `(bound, label)`
//! pairs. Bounds are tried in ascending order and the first one that admits
//! the value wins; a value beyond every bound (including NaN) takes the last
//! label. Classification is therefore total: it never fails once the table
//! exists.

use serde::{Deserialize, Serialize};

use crate::error::ImpactError;

// =============================================================================
// Thresholds
// =============================================================================

/// Upper bound of one band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Admits `value <= bound`.
    AtMost(f64),
    /// Admits `value < bound`.
    Below(f64),
}

impl Bound {
    pub fn value(self) -> f64 {
        match self {
            Bound::AtMost(v) | Bound::Below(v) => v,
        }
    }

    pub fn admits(self, value: f64) -> bool {
        match self {
            Bound::AtMost(b) => value <= b,
            Bound::Below(b) => value < b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold<L> {
    pub bound: Bound,
    pub label: L,
}

impl<L> Threshold<L> {
    pub fn at_most(bound: f64, label: L) -> Self {
        Self {
            bound: Bound::AtMost(bound),
            label,
        }
    }

    pub fn below(bound: f64, label: L) -> Self {
        Self {
            bound: Bound::Below(bound),
            label,
        }
    }
}

/// Non-empty, ascending list of thresholds. The last entry is the catch-all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdTable<L> {
    thresholds: Vec<Threshold<L>>,
}

impl<L> ThresholdTable<L> {
    /// Build a table, rejecting empty lists, NaN bounds and descending bounds.
    pub fn new(thresholds: Vec<Threshold<L>>) -> Result<Self, ImpactError> {
        if thresholds.is_empty() {
            return Err(ImpactError::invalid_text(
                "thresholds",
                "[]",
                "at least one threshold is required",
            ));
        }
        let mut previous = f64::NEG_INFINITY;
        for t in &thresholds {
            let b = t.bound.value();
            if b.is_nan() {
                return Err(ImpactError::invalid("thresholds", b, "bound must not be NaN"));
            }
            if b < previous {
                return Err(ImpactError::invalid(
                    "thresholds",
                    b,
                    "bounds must be in ascending order",
                ));
            }
            previous = b;
        }
        Ok(Self { thresholds })
    }

    /// Built-in tables are written in ascending order by hand.
    pub(crate) fn preset(thresholds: Vec<Threshold<L>>) -> Self {
        debug_assert!(!thresholds.is_empty());
        debug_assert!(thresholds
            .windows(2)
            .all(|w| w[0].bound.value() <= w[1].bound.value()));
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &[Threshold<L>] {
        &self.thresholds
    }

    /// Label for `value`. Total over every `f64`.
    pub fn classify(&self, value: f64) -> &L {
        // Non-empty by construction.
        let catch_all = &self.thresholds[self.thresholds.len() - 1];
        &self
            .thresholds
            .iter()
            .find(|t| t.bound.admits(value))
            .unwrap_or(catch_all)
            .label
    }
}

/// Free-function form of [`ThresholdTable::classify`] for `Copy` labels.
pub fn classify<L: Copy>(value: f64, table: &ThresholdTable<L>) -> L {
    *table.classify(value)
}

// =============================================================================
// Eco color tiers
// =============================================================================

/// Traffic-light tier used across every view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EcoTier {
    #[default]
    Green,
    Yellow,
    Orange,
    Red,
}

impl EcoTier {
    pub fn label(self) -> &'static str {
        match self {
            EcoTier::Green => "Good",
            EcoTier::Yellow => "Fair",
            EcoTier::Orange => "Poor",
            EcoTier::Red => "Severe",
        }
    }

    /// Theme color name.
    pub fn color(self) -> &'static str {
        match self {
            EcoTier::Green => "eco-green",
            EcoTier::Yellow => "eco-yellow",
            EcoTier::Orange => "eco-orange",
            EcoTier::Red => "eco-red",
        }
    }
}

// =============================================================================
// Preset tables
// =============================================================================

/// Daily carbon total in kg: < 2 green, < 3 yellow, otherwise red.
pub fn carbon_total_tiers() -> ThresholdTable<EcoTier> {
    ThresholdTable::preset(vec![
        Threshold::below(2.0, EcoTier::Green),
        Threshold::below(3.0, EcoTier::Yellow),
        Threshold::at_most(f64::INFINITY, EcoTier::Red),
    ])
}

/// Percent of a limit used: < 50 green, < 75 yellow, otherwise red.
pub fn usage_percent_tiers() -> ThresholdTable<EcoTier> {
    ThresholdTable::preset(vec![
        Threshold::below(50.0, EcoTier::Green),
        Threshold::below(75.0, EcoTier::Yellow),
        Threshold::at_most(f64::INFINITY, EcoTier::Red),
    ])
}

/// Route eco score (1-10): >= 8 green, >= 5 yellow, otherwise red.
pub fn route_score_tiers() -> ThresholdTable<EcoTier> {
    ThresholdTable::preset(vec![
        Threshold::below(5.0, EcoTier::Red),
        Threshold::below(8.0, EcoTier::Yellow),
        Threshold::at_most(f64::INFINITY, EcoTier::Green),
    ])
}

pub fn carbon_total_tier(kg: f64) -> EcoTier {
    classify(kg, &carbon_total_tiers())
}

pub fn usage_tier(percent: f64) -> EcoTier {
    classify(percent, &usage_percent_tiers())
}

pub fn route_score_tier(score: u8) -> EcoTier {
    classify(f64::from(score), &route_score_tiers())
}

// =============================================================================
// Unit tests
// =============================================================================
