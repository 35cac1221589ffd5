use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analytics::domain::{
    Evidence, EvidenceField, EvidenceValue, Finding, RecommendationCategory,
};
use crate::analytics::evaluators::BenchmarkSet;
use crate::analytics::snapshot::{
    CustomerBase, FunnelStage, FunnelStageKind, MetricPeriod, MetricSnapshot, RecencyBucket,
    RevenueBaseline, SkuInventory, SnapshotParts, TrafficMetrics,
};
use crate::analytics::DeviceCategory;

pub(super) fn benchmarks() -> BenchmarkSet {
    BenchmarkSet::industry_default()
}

pub(super) fn period() -> MetricPeriod {
    MetricPeriod {
        start: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
        end: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"),
    }
}

pub(super) fn funnel(counts: [u64; 5]) -> Vec<FunnelStage> {
    FunnelStageKind::ordered()
        .into_iter()
        .zip(counts)
        .map(|(kind, visitors)| FunnelStage { kind, visitors })
        .collect()
}

pub(super) fn channel_share(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(channel, share)| (channel.to_string(), *share))
        .collect()
}

pub(super) fn baseline() -> RevenueBaseline {
    RevenueBaseline {
        trailing_30d_revenue: 191_667.0,
        average_order_value: 78.0,
        observed_days: 30,
    }
}

/// A store with trouble in every corner: high checkout drop-off, a mobile
/// conversion gap, a large dormant cohort, elevated bounce, and three SKUs
/// in bad shape.
pub(super) fn sample_parts() -> SnapshotParts {
    let mut device_conversion = BTreeMap::new();
    device_conversion.insert(DeviceCategory::Desktop, 0.062);
    device_conversion.insert(DeviceCategory::Mobile, 0.048);
    device_conversion.insert(DeviceCategory::Tablet, 0.055);

    let mut inventory = BTreeMap::new();
    inventory.insert(
        "canvas-sneaker".to_string(),
        SkuInventory {
            days_of_stock: 45.0,
            sell_through_rate: 0.12,
            trailing_revenue: 15_600.0,
        },
    );
    inventory.insert(
        "denim-jacket".to_string(),
        SkuInventory {
            days_of_stock: 9.0,
            sell_through_rate: 0.82,
            trailing_revenue: 28_500.0,
        },
    );
    inventory.insert(
        "graphic-tee-bundle".to_string(),
        SkuInventory {
            days_of_stock: 12.0,
            sell_through_rate: 0.71,
            trailing_revenue: 18_900.0,
        },
    );
    inventory.insert(
        "street-hoodie".to_string(),
        SkuInventory {
            days_of_stock: 21.0,
            sell_through_rate: 0.64,
            trailing_revenue: 22_400.0,
        },
    );

    SnapshotParts {
        period: period(),
        traffic: TrafficMetrics {
            visits: 45_000,
            sessions: 52_000,
            bounce_rate: 0.58,
            channel_share: channel_share(&[
                ("organic", 0.35),
                ("paid", 0.25),
                ("social", 0.20),
                ("email", 0.15),
                ("direct", 0.05),
            ]),
        },
        funnel: funnel([45_000, 22_500, 6_750, 4_050, 2_458]),
        device_conversion,
        customers: CustomerBase {
            total: 12_400,
            recency: vec![
                RecencyBucket {
                    days_since_last_order_min: 0,
                    customers: 5_200,
                    avg_order_value: 82.0,
                },
                RecencyBucket {
                    days_since_last_order_min: 30,
                    customers: 2_900,
                    avg_order_value: 75.0,
                },
                RecencyBucket {
                    days_since_last_order_min: 60,
                    customers: 1_060,
                    avg_order_value: 71.0,
                },
                RecencyBucket {
                    days_since_last_order_min: 90,
                    customers: 3_240,
                    avg_order_value: 145.0,
                },
            ],
        },
        inventory,
        baseline: baseline(),
    }
}

pub(super) fn sample_snapshot() -> MetricSnapshot {
    MetricSnapshot::new(sample_parts()).expect("sample snapshot is valid")
}

/// A healthy store that should produce no findings at all.
pub(super) fn quiet_parts() -> SnapshotParts {
    let mut parts = sample_parts();
    parts.traffic.bounce_rate = 0.44;
    parts.funnel = funnel([45_000, 22_500, 6_750, 4_050, 2_900]);
    parts
        .device_conversion
        .insert(DeviceCategory::Mobile, 0.058);
    parts.customers = CustomerBase {
        total: 10_000,
        recency: vec![
            RecencyBucket {
                days_since_last_order_min: 0,
                customers: 9_500,
                avg_order_value: 80.0,
            },
            RecencyBucket {
                days_since_last_order_min: 90,
                customers: 500,
                avg_order_value: 100.0,
            },
        ],
    };
    parts.inventory.clear();
    parts.inventory.insert(
        "street-hoodie".to_string(),
        SkuInventory {
            days_of_stock: 21.0,
            sell_through_rate: 0.64,
            trailing_revenue: 22_400.0,
        },
    );
    parts
}

pub(super) fn quiet_snapshot() -> MetricSnapshot {
    MetricSnapshot::new(quiet_parts()).expect("quiet snapshot is valid")
}

pub(super) fn finding(
    category: RecommendationCategory,
    title: &str,
    severity: f64,
) -> Finding {
    let mut evidence = Evidence::new();
    match category {
        RecommendationCategory::Conversion => {
            evidence.insert(EvidenceField::CheckoutDropoff, EvidenceValue::Decimal(0.4));
        }
        RecommendationCategory::Retention => {
            evidence.insert(EvidenceField::DormantCustomers, EvidenceValue::Count(3_000));
        }
        RecommendationCategory::Revenue => {
            evidence.insert(
                EvidenceField::EstimatedRevenue,
                EvidenceValue::Amount(10_000.0),
            );
        }
        RecommendationCategory::Traffic => {
            evidence.insert(EvidenceField::BounceRate, EvidenceValue::Decimal(0.6));
        }
        RecommendationCategory::Inventory => {
            evidence.insert(EvidenceField::DaysOfStock, EvidenceValue::Decimal(5.0));
        }
    }

    Finding {
        category,
        title: title.to_string(),
        description: format!("{title} (details)"),
        severity,
        evidence,
        subject: None,
        remediation_steps: vec![
            "First step".to_string(),
            "Second step".to_string(),
            "Third step".to_string(),
        ],
        implementation_estimate: "1 day".to_string(),
    }
}

pub(super) fn finding_with_revenue(
    category: RecommendationCategory,
    title: &str,
    severity: f64,
    estimated_revenue: f64,
) -> Finding {
    let mut finding = finding(category, title, severity);
    finding.evidence.insert(
        EvidenceField::EstimatedRevenue,
        EvidenceValue::Amount(estimated_revenue),
    );
    finding
}
