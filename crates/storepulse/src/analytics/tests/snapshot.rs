use super::common::*;
use crate::analytics::snapshot::{FunnelStageKind, MetricSnapshot, ValidationError};

#[test]
fn valid_parts_build_a_snapshot() {
    let snapshot = MetricSnapshot::new(sample_parts()).expect("snapshot builds");
    assert_eq!(snapshot.traffic.visits, 45_000);
    assert_eq!(snapshot.stage_visitors(FunnelStageKind::Purchase), 2_458);
}

#[test]
fn funnel_must_be_non_increasing() {
    let mut parts = sample_parts();
    parts.funnel = funnel([45_000, 22_500, 6_750, 4_050, 4_100]);

    match MetricSnapshot::new(parts) {
        Err(ValidationError::FunnelNotMonotonic { stage, current, previous }) => {
            assert_eq!(stage, "purchase");
            assert_eq!(current, 4_100);
            assert_eq!(previous, 4_050);
        }
        other => panic!("expected funnel monotonicity error, got {other:?}"),
    }
}

#[test]
fn funnel_must_list_every_stage() {
    let mut parts = sample_parts();
    parts.funnel.pop();

    assert!(matches!(
        MetricSnapshot::new(parts),
        Err(ValidationError::FunnelLength { expected: 5, found: 4 })
    ));
}

#[test]
fn channel_shares_must_sum_to_one() {
    let mut parts = sample_parts();
    parts.traffic.channel_share = channel_share(&[("organic", 0.5), ("paid", 0.3)]);

    match MetricSnapshot::new(parts) {
        Err(ValidationError::ChannelShareSum { sum }) => {
            assert!((sum - 0.8).abs() < 1e-9);
        }
        other => panic!("expected channel share error, got {other:?}"),
    }
}

#[test]
fn empty_channel_breakdown_is_accepted() {
    let mut parts = sample_parts();
    parts.traffic.channel_share.clear();

    assert!(MetricSnapshot::new(parts).is_ok());
}

#[test]
fn rates_outside_unit_interval_are_rejected() {
    let mut parts = sample_parts();
    parts.traffic.bounce_rate = 1.2;

    match MetricSnapshot::new(parts) {
        Err(ValidationError::RateOutOfRange { field, value }) => {
            assert_eq!(field, "traffic.bounce_rate");
            assert!((value - 1.2).abs() < 1e-9);
        }
        other => panic!("expected rate error, got {other:?}"),
    }
}

#[test]
fn period_must_be_ordered() {
    let mut parts = sample_parts();
    std::mem::swap(&mut parts.period.start, &mut parts.period.end);

    assert!(matches!(
        MetricSnapshot::new(parts),
        Err(ValidationError::PeriodOrder { .. })
    ));
}

#[test]
fn bucketed_customers_cannot_exceed_total() {
    let mut parts = sample_parts();
    parts.customers.total = 100;

    assert!(matches!(
        MetricSnapshot::new(parts),
        Err(ValidationError::CustomerCounts { .. })
    ));
}

#[test]
fn checkout_dropoff_matches_funnel_counts() {
    let snapshot = sample_snapshot();
    let dropoff = snapshot.checkout_dropoff().expect("checkouts present");
    assert!((dropoff - (1.0 - 2_458.0 / 4_050.0)).abs() < 1e-9);
}

#[test]
fn dormant_cohort_aggregates_old_buckets() {
    let snapshot = sample_snapshot();
    let (dormant, aov) = snapshot.dormant_cohort(90);
    assert_eq!(dormant, 3_240);
    assert!((aov - 145.0).abs() < 1e-9);

    let (none, zero) = snapshot.dormant_cohort(365);
    assert_eq!(none, 0);
    assert_eq!(zero, 0.0);
}
