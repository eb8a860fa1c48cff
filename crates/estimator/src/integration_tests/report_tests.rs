//! Session report snapshots and their JSON shape.

use crate::factors::{ImpactCategory, VehicleKind, WasteStream, WaterUse};
use crate::session::{make_response, ResponsePayload};
use crate::test_harness::TestSession;

#[test]
fn test_report_reflects_session_state() {
    let mut session = TestSession::new();
    session
        .submit(ImpactCategory::Transport(VehicleKind::Car), 10.0)
        .submit(ImpactCategory::Water(WaterUse::Shower), 45.0)
        .submit(ImpactCategory::Waste(WasteStream::Recyclable), 1.0)
        .record_electricity(None, 300.0)
        .request_route("Home", "Office");
    session.settle_routes();

    let report = session.report();
    assert_eq!(report.today.to_string(), "2025-11-03");
    assert_eq!(report.entries, 3);
    assert!((report.carbon.total_kg - 3.3).abs() < 1e-9);
    assert_eq!(report.water.used_liters(), 45.0);
    assert_eq!(report.waste.recycling_rate, 100.0);
    assert_eq!(report.electricity.monthly_average_units, 300.0);
    assert_eq!(report.routes.as_ref().unwrap().distance_km, 5.0);
}

#[test]
fn test_summary_response_serializes_nested_report() {
    let mut session = TestSession::new();
    session.submit(ImpactCategory::Transport(VehicleKind::Bus), 4.0);
    session.tick(1);

    let response = make_response(ResponsePayload::Summary {
        report: Box::new(session.report()),
    });
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["type"], "summary");
    assert_eq!(json["protocol_version"], 1);
    assert_eq!(json["report"]["entries"], 1);
    assert_eq!(json["report"]["carbon"]["budget"]["tier"], "green");
    assert!(json["report"].get("routes").is_none());
}
