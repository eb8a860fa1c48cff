//! `BudgetBandChanged` events as usage crosses tier boundaries.

use crate::classify::EcoTier;
use crate::factors::{ImpactCategory, VehicleKind, WaterUse};
use crate::session::{BudgetBandChanged, BudgetKind};
use crate::test_harness::TestSession;

fn changes_for(session: &mut TestSession, kind: BudgetKind) -> Vec<BudgetBandChanged> {
    session
        .drain_events::<BudgetBandChanged>()
        .into_iter()
        .filter(|c| c.domain == kind)
        .collect()
}

#[test]
fn test_fresh_session_reports_no_band_changes() {
    let mut session = TestSession::new();
    session.tick(3);
    assert!(session.drain_events::<BudgetBandChanged>().is_empty());
    assert_eq!(session.bands().carbon, EcoTier::Green);
}

#[test]
fn test_carbon_climbs_green_yellow_red() {
    let mut session = TestSession::new();

    // 1.2 + 1.05 = 2.25 kg: 56 %.
    session.submit(ImpactCategory::Transport(VehicleKind::Car), 5.0);
    session.tick(1);
    let changes = changes_for(&mut session, BudgetKind::DailyCarbon);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].tier, EcoTier::Yellow);

    // + 2.1 kg = 4.35 kg: over the limit.
    session.submit(ImpactCategory::Transport(VehicleKind::Car), 10.0);
    session.tick(1);
    let changes = changes_for(&mut session, BudgetKind::DailyCarbon);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].tier, EcoTier::Red);
    assert!(changes[0].percent > 100.0);
    assert_eq!(session.bands().carbon, EcoTier::Red);
}

#[test]
fn test_jump_straight_to_red_fires_once() {
    let mut session = TestSession::new();
    session.submit(ImpactCategory::Transport(VehicleKind::Plane), 100.0);
    session.tick(1);
    let changes = changes_for(&mut session, BudgetKind::DailyCarbon);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].tier, EcoTier::Red);
}

#[test]
fn test_raising_the_limit_moves_back_to_green() {
    let mut session = TestSession::new();
    session.submit(ImpactCategory::Transport(VehicleKind::Car), 10.0);
    session.tick(1);
    assert_eq!(session.bands().carbon, EcoTier::Red);
    session.drain_events::<BudgetBandChanged>();

    session.update_config(|c| c.limits.daily_carbon_kg = 10.0);
    session.tick(1);
    let changes = changes_for(&mut session, BudgetKind::DailyCarbon);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].tier, EcoTier::Green);
}

#[test]
fn test_water_band_tracks_daily_liters() {
    let mut session = TestSession::new();
    session.submit(ImpactCategory::Water(WaterUse::Bath), 120.0);
    session.tick(1);
    let changes = changes_for(&mut session, BudgetKind::DailyWater);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].tier, EcoTier::Yellow);
    assert!((changes[0].percent - 60.0).abs() < 1e-9);
}

#[test]
fn test_electricity_band_uses_latest_bill() {
    let mut session = TestSession::new();
    // 40 kWh * 9 = 360 of a 500 budget: 72 %.
    session.record_electricity(None, 40.0);
    session.tick(1);
    let changes = changes_for(&mut session, BudgetKind::MonthlyElectricity);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].tier, EcoTier::Yellow);

    // Re-entering the month replaces the reading: 20 kWh = 36 %.
    session.record_electricity(None, 20.0);
    session.tick(1);
    let changes = changes_for(&mut session, BudgetKind::MonthlyElectricity);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].tier, EcoTier::Green);
    assert_eq!(session.electricity().len(), 1);
}
