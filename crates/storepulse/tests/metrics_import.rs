use std::io::Cursor;

use storepulse::analytics::snapshot::FunnelStageKind;
use storepulse::analytics::{generate_recommendations, BenchmarkSet, DeviceCategory};
use storepulse::ingest::{ImportError, MetricsCsvImporter};

const HEADER: &str = "Date,Visitors,Sessions,Product Views,Add to Carts,Checkouts,Purchases,Revenue,Bounce Rate,Organic Visits,Paid Visits,Social Visits,Email Visits,Direct Visits,Desktop Conversion,Mobile Conversion\n";

fn daily_export(days: u32) -> String {
    let mut csv = String::from(HEADER);
    for day in 1..=days {
        csv.push_str(&format!(
            "2025-07-{day:02},1500,1600,750,225,135,82,6400,0.52,525,375,300,225,75,0.062,0.048\n"
        ));
    }
    csv
}

#[test]
fn import_aggregates_daily_rows_into_a_snapshot() {
    let snapshot =
        MetricsCsvImporter::from_reader(Cursor::new(daily_export(10))).expect("imports");

    assert_eq!(snapshot.traffic.visits, 15_000);
    assert_eq!(snapshot.traffic.sessions, 16_000);
    assert_eq!(snapshot.stage_visitors(FunnelStageKind::Checkout), 1_350);
    assert_eq!(snapshot.stage_visitors(FunnelStageKind::Purchase), 820);
    assert_eq!(snapshot.baseline.observed_days, 10);
    assert!((snapshot.traffic.bounce_rate - 0.52).abs() < 1e-9);
    assert!((snapshot.baseline.trailing_30d_revenue - 64_000.0).abs() < 1e-6);
    assert!((snapshot.baseline.average_order_value - 64_000.0 / 820.0).abs() < 1e-9);

    assert_eq!(snapshot.traffic.channel_share.len(), 5);
    assert!((snapshot.traffic.channel_share["organic"] - 0.35).abs() < 1e-9);

    let desktop = snapshot.device_conversion[&DeviceCategory::Desktop];
    assert!((desktop - 0.062).abs() < 1e-9);

    assert_eq!(snapshot.customers.total, 0);
    assert!(snapshot.inventory.is_empty());
}

#[test]
fn optional_columns_may_be_missing_entirely() {
    let csv = "Date,Visitors,Product Views,Add to Carts,Checkouts,Purchases,Revenue\n\
               2025-07-01,1500,750,225,135,82,6400\n\
               2025-07-02,1400,700,210,126,80,6200\n";

    let snapshot = MetricsCsvImporter::from_reader(Cursor::new(csv)).expect("imports");

    assert_eq!(snapshot.traffic.sessions, snapshot.traffic.visits);
    assert_eq!(snapshot.traffic.bounce_rate, 0.0);
    assert!(snapshot.traffic.channel_share.is_empty());
    assert!(snapshot.device_conversion.is_empty());
}

#[test]
fn empty_exports_are_rejected() {
    assert!(matches!(
        MetricsCsvImporter::from_reader(Cursor::new(HEADER)),
        Err(ImportError::Empty)
    ));
}

#[test]
fn malformed_dates_are_rejected() {
    let csv = format!("{HEADER}07/01/2025,1500,1600,750,225,135,82,6400,0.52,525,375,300,225,75,0.062,0.048\n");

    match MetricsCsvImporter::from_reader(Cursor::new(csv)) {
        Err(ImportError::Date { raw, .. }) => assert_eq!(raw, "07/01/2025"),
        other => panic!("expected date error, got {other:?}"),
    }
}

#[test]
fn impossible_funnels_fail_snapshot_validation() {
    let csv = format!("{HEADER}2025-07-01,1500,1600,750,225,135,300,6400,0.52,525,375,300,225,75,0.062,0.048\n");

    assert!(matches!(
        MetricsCsvImporter::from_reader(Cursor::new(csv)),
        Err(ImportError::Snapshot(_))
    ));
}

#[test]
fn imported_snapshots_flow_straight_into_the_engine() {
    let snapshot =
        MetricsCsvImporter::from_reader(Cursor::new(daily_export(10))).expect("imports");
    let ranked =
        generate_recommendations(&snapshot, &BenchmarkSet::industry_default(), None);

    // Checkout drop-off (39%) and the mobile gap both fire from export data alone.
    assert_eq!(ranked.len(), 2);
    assert!(ranked
        .iter()
        .all(|item| item.category.label() == "conversion"));

    // Ten days of history reduce confidence accordingly.
    for item in ranked.iter() {
        assert!((item.confidence - 10.0 / 30.0).abs() < 1e-9);
    }
}
