//! Unit tests for the session systems, run against a bare `App`.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::aggregate::ImpactLog;
    use crate::carbon::CarbonSummary;
    use crate::classify::EcoTier;
    use crate::config::EstimatorConfig;
    use crate::electricity::{ElectricityHistory, YearMonth};
    use crate::factors::{ImpactCategory, MealKind, VehicleKind, WaterUse};
    use crate::session::*;
    use crate::water::WaterSummary;
    use crate::EstimatorSet;

    fn session_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.configure_sets(
            Update,
            (
                EstimatorSet::Intake,
                EstimatorSet::Compute,
                EstimatorSet::Report,
            )
                .chain(),
        );
        app.init_resource::<EstimatorConfig>();
        app.insert_resource(SessionClock::pinned(
            Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap(),
        ));
        app.add_plugins(SessionPlugin);
        app
    }

    #[test]
    fn test_submission_is_logged_and_summarized() {
        let mut app = session_app();
        app.world_mut().send_event(SubmitImpact::new(
            ImpactCategory::Transport(VehicleKind::Car),
            10.0,
        ));
        app.update();

        let log = app.world().resource::<ImpactLog>();
        assert_eq!(log.len(), 1);
        let carbon = app.world().resource::<CarbonSummary>();
        assert!((carbon.transport_kg - 2.1).abs() < 1e-9);
        assert!((carbon.total_kg - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_submission_defaults_to_clock_time() {
        let mut app = session_app();
        app.world_mut().send_event(SubmitImpact::new(
            ImpactCategory::Diet(MealKind::Vegan),
            1.0,
        ));
        app.update();
        let log = app.world().resource::<ImpactLog>();
        assert_eq!(
            log.entries()[0].timestamp,
            Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_rejected_submission_posts_error_notice() {
        let mut app = session_app();
        app.world_mut().send_event(SubmitImpact::new(
            ImpactCategory::Water(WaterUse::Shower),
            -5.0,
        ));
        app.update();

        assert!(app.world().resource::<ImpactLog>().is_empty());
        let notices = app.world().resource::<NoticeLog>();
        let last = notices.last().unwrap();
        assert_eq!(last.level, NoticeLevel::Error);
        assert!(last.text.contains("Invalid input"), "got {}", last.text);
    }

    #[test]
    fn test_success_notice_names_category() {
        let mut app = session_app();
        app.world_mut().send_event(
            SubmitImpact::new(ImpactCategory::Water(WaterUse::Laundry), 40.0)
                .with_label("Laundry"),
        );
        app.update();
        let notice = app.world().resource::<NoticeLog>().last().cloned().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(notice.text.contains("40.00 L"), "got {}", notice.text);
    }

    #[test]
    fn test_water_summary_follows_log() {
        let mut app = session_app();
        for liters in [45.0, 25.0] {
            app.world_mut().send_event(SubmitImpact::new(
                ImpactCategory::Water(WaterUse::Shower),
                liters,
            ));
        }
        app.update();
        let water = app.world().resource::<WaterSummary>();
        assert_eq!(water.used_liters(), 70.0);
        assert_eq!(water.shares.len(), 1);
    }

    #[test]
    fn test_stale_dated_summary_is_refreshed_without_other_changes() {
        let mut app = session_app();
        app.world_mut().send_event(SubmitImpact::new(
            ImpactCategory::Transport(VehicleKind::Car),
            10.0,
        ));
        app.update();
        let fresh = app.world().resource::<CarbonSummary>().clone();

        // Leftover from yesterday: nothing else changes before the next tick.
        {
            let mut carbon = app.world_mut().resource_mut::<CarbonSummary>();
            carbon.date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
            carbon.total_kg = 0.0;
        }
        app.update();

        let carbon = app.world().resource::<CarbonSummary>();
        assert_eq!(carbon.date, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(*carbon, fresh);
    }

    #[test]
    fn test_electricity_reading_uses_clock_month() {
        let mut app = session_app();
        app.world_mut().send_event(SubmitElectricityReading {
            month: None,
            units: 320.0,
        });
        app.update();
        let history = app.world().resource::<ElectricityHistory>();
        let usage = history.get(YearMonth::new(2025, 11).unwrap()).unwrap();
        assert!((usage.bill - 2880.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_change_fires_once_per_transition() {
        let mut app = session_app();
        app.update();
        // Baseline 1.2 kg is 30 %: green, nothing fired.
        assert_eq!(app.world().resource::<BudgetBands>().carbon, EcoTier::Green);

        // Car 5 km: 1.2 + 1.05 = 2.25 kg = 56 %: yellow.
        app.world_mut().send_event(SubmitImpact::new(
            ImpactCategory::Transport(VehicleKind::Car),
            5.0,
        ));
        app.update();
        let fired: Vec<BudgetBandChanged> = app
            .world_mut()
            .resource_mut::<Events<BudgetBandChanged>>()
            .drain()
            .collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].domain, BudgetKind::DailyCarbon);
        assert_eq!(fired[0].tier, EcoTier::Yellow);

        // Small addition inside the same band: no event.
        app.world_mut().send_event(SubmitImpact::new(
            ImpactCategory::Transport(VehicleKind::Bus),
            1.0,
        ));
        app.update();
        let fired = app
            .world_mut()
            .resource_mut::<Events<BudgetBandChanged>>()
            .drain()
            .count();
        assert_eq!(fired, 0);
    }
}
