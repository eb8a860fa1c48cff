use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::clock::SessionClock;
use super::events::{
    BudgetBandChanged, BudgetKind, ImpactRecorded, SubmitElectricityReading, SubmitImpact,
};
use super::notices::Notice;
use crate::aggregate::{ImpactLog, TimeWindow};
use crate::carbon::{summarize_carbon, CarbonSummary};
use crate::classify::EcoTier;
use crate::config::EstimatorConfig;
use crate::electricity::{ElectricityHistory, YearMonth};
use crate::water::{summarize_water, WaterSummary};
use crate::waste::{summarize_waste, WasteSummary};

// =============================================================================
// Intake
// =============================================================================

/// Convert submitted activities and append them to the log.
///
/// A rejected submission leaves the log untouched and produces an error
/// notice instead.
pub fn record_submissions(
    mut submissions: EventReader<SubmitImpact>,
    config: Res<EstimatorConfig>,
    clock: Res<SessionClock>,
    mut log: ResMut<ImpactLog>,
    mut recorded: EventWriter<ImpactRecorded>,
    mut notices: EventWriter<Notice>,
) {
    let params = config.conversion_params();
    for submission in submissions.read() {
        let timestamp = submission.at.unwrap_or_else(|| clock.now());
        match log.record(
            &params,
            submission.category,
            submission.quantity,
            submission.label.clone(),
            timestamp,
        ) {
            Ok(entry) => {
                debug!(
                    "Recorded entry #{}: {} x {} = {:.3} {}",
                    entry.id,
                    entry.category,
                    entry.quantity,
                    entry.computed_impact,
                    entry.domain().unit()
                );
                notices.send(Notice::success(format!(
                    "Added {}: {:.2} {}",
                    entry.category.label(),
                    entry.computed_impact,
                    entry.domain().unit()
                )));
                recorded.send(ImpactRecorded {
                    entry: entry.clone(),
                });
            }
            Err(err) => {
                warn!("Rejected {} submission: {err}", submission.category);
                notices.send(Notice::error(err.to_string()));
            }
        }
    }
}

/// Store monthly electricity readings.
pub fn record_electricity_readings(
    mut readings: EventReader<SubmitElectricityReading>,
    config: Res<EstimatorConfig>,
    clock: Res<SessionClock>,
    mut history: ResMut<ElectricityHistory>,
    mut notices: EventWriter<Notice>,
) {
    for reading in readings.read() {
        let month = reading.month.unwrap_or_else(|| YearMonth::of(clock.now()));
        match history.record(month, reading.units, &config.tariff) {
            Ok(usage) => {
                debug!("Recorded {} kWh for {month}", usage.units);
                notices.send(Notice::success(format!(
                    "Recorded {} kWh for {month}: bill {:.2}, {:.1} kg CO2",
                    usage.units, usage.bill, usage.carbon_kg
                )));
            }
            Err(err) => {
                warn!("Rejected electricity reading for {month}: {err}");
                notices.send(Notice::error(err.to_string()));
            }
        }
    }
}

// =============================================================================
// Compute
// =============================================================================

/// Recompute the daily summaries when the log, config or clock changed, or
/// when a summary no longer covers the clock's current day.
pub fn refresh_summaries(
    config: Res<EstimatorConfig>,
    clock: Res<SessionClock>,
    log: Res<ImpactLog>,
    mut carbon: ResMut<CarbonSummary>,
    mut water: ResMut<WaterSummary>,
    mut waste: ResMut<WasteSummary>,
) {
    let now = clock.now();
    let today = now.date_naive();
    let window = TimeWindow::day_of(now);
    // An unpinned clock crosses midnight without being marked changed.
    let stale = carbon.date != today || water.date != today || waste.window != window;
    if !(stale || log.is_changed() || config.is_changed() || clock.is_changed()) {
        return;
    }
    let entries = log.entries();

    match summarize_carbon(entries, today, &config) {
        Ok(summary) => *carbon = summary,
        Err(err) => warn!("Carbon summary not updated: {err}"),
    }
    match summarize_water(entries, today, &config) {
        Ok(summary) => *water = summary,
        Err(err) => warn!("Water summary not updated: {err}"),
    }
    *waste = summarize_waste(entries, window);
}

// =============================================================================
// Report
// =============================================================================

/// Last reported tier per budget.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetBands {
    pub carbon: EcoTier,
    pub water: EcoTier,
    pub electricity: EcoTier,
}

/// Fire `BudgetBandChanged` when a budget's usage tier moves.
pub fn report_band_changes(
    carbon: Res<CarbonSummary>,
    water: Res<WaterSummary>,
    history: Res<ElectricityHistory>,
    config: Res<EstimatorConfig>,
    mut bands: ResMut<BudgetBands>,
    mut changes: EventWriter<BudgetBandChanged>,
) {
    let mut observed: Vec<(BudgetKind, EcoTier, f64)> = Vec::with_capacity(3);
    if carbon.is_changed() {
        observed.push((BudgetKind::DailyCarbon, carbon.budget.tier, carbon.budget.percent));
    }
    if water.is_changed() {
        observed.push((BudgetKind::DailyWater, water.budget.tier, water.budget.percent));
    }
    if history.is_changed() || config.is_changed() {
        if let Some(latest) = history.latest() {
            match history.bill_status(latest.month, config.limits.monthly_electricity_budget) {
                Ok(Some(status)) => {
                    observed.push((BudgetKind::MonthlyElectricity, status.tier, status.percent))
                }
                Ok(None) => {}
                Err(err) => warn!("Electricity budget not evaluated: {err}"),
            }
        }
    }

    for (kind, tier, percent) in observed {
        let previous = match kind {
            BudgetKind::DailyCarbon => &mut bands.carbon,
            BudgetKind::DailyWater => &mut bands.water,
            BudgetKind::MonthlyElectricity => &mut bands.electricity,
        };
        if *previous != tier {
            info!(
                "{} budget moved from {} to {} ({percent:.0}% used)",
                kind.label(),
                previous.label(),
                tier.label()
            );
            *previous = tier;
            changes.send(BudgetBandChanged {
                domain: kind,
                tier,
                percent,
            });
        }
    }
}
