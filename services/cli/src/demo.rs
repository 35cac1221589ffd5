use std::collections::BTreeMap;

use chrono::NaiveDate;
use storepulse::analytics::snapshot::{
    CustomerBase, FunnelStage, FunnelStageKind, MetricPeriod, MetricSnapshot, RecencyBucket,
    RevenueBaseline, SkuInventory, SnapshotParts, TrafficMetrics,
};
use storepulse::analytics::{BenchmarkSet, DeviceCategory, EngineConfig, RecommendationEngine};

use crate::cli::DemoArgs;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::render;

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs { limit, json } = args;

    let snapshot = demo_snapshot()?;
    let benchmarks = BenchmarkSet::industry_default();
    let limit = limit.or(config.default_limit);

    if !json {
        println!("UrbanThreads demo store, {} - {}\n", snapshot.period.start, snapshot.period.end);
    }

    let engine = RecommendationEngine::new(EngineConfig::default());
    let ranked = engine.generate(&snapshot, &benchmarks, limit);

    render::emit(&snapshot, &benchmarks, ranked, json)
}

/// A month of apparel-store metrics with problems in every corner: a leaky
/// checkout, a weak mobile experience, a big dormant cohort, elevated bounce,
/// and a few SKUs in bad shape.
fn demo_snapshot() -> Result<MetricSnapshot, AppError> {
    let mut device_conversion = BTreeMap::new();
    device_conversion.insert(DeviceCategory::Desktop, 0.062);
    device_conversion.insert(DeviceCategory::Mobile, 0.048);
    device_conversion.insert(DeviceCategory::Tablet, 0.055);

    let mut channel_share = BTreeMap::new();
    channel_share.insert("organic".to_string(), 0.35);
    channel_share.insert("paid".to_string(), 0.25);
    channel_share.insert("social".to_string(), 0.20);
    channel_share.insert("email".to_string(), 0.15);
    channel_share.insert("direct".to_string(), 0.05);

    let mut inventory = BTreeMap::new();
    inventory.insert(
        "vintage-denim-jacket".to_string(),
        SkuInventory {
            days_of_stock: 9.0,
            sell_through_rate: 0.82,
            trailing_revenue: 28_500.0,
        },
    );
    inventory.insert(
        "streetwear-hoodie".to_string(),
        SkuInventory {
            days_of_stock: 21.0,
            sell_through_rate: 0.64,
            trailing_revenue: 22_400.0,
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
        "canvas-sneakers".to_string(),
        SkuInventory {
            days_of_stock: 45.0,
            sell_through_rate: 0.12,
            trailing_revenue: 15_600.0,
        },
    );

    let parts = SnapshotParts {
        period: MetricPeriod {
            start: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"),
        },
        traffic: TrafficMetrics {
            visits: 45_000,
            sessions: 52_000,
            bounce_rate: 0.58,
            channel_share,
        },
        funnel: FunnelStageKind::ordered()
            .into_iter()
            .zip([45_000, 22_500, 6_750, 4_050, 2_458])
            .map(|(kind, visitors)| FunnelStage { kind, visitors })
            .collect(),
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
        baseline: RevenueBaseline {
            trailing_30d_revenue: 191_667.0,
            average_order_value: 78.0,
            observed_days: 30,
        },
    };

    Ok(MetricSnapshot::new(parts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_snapshot_is_valid_and_productive() {
        let snapshot = demo_snapshot().expect("demo snapshot builds");
        let engine = RecommendationEngine::new(EngineConfig::default());
        let ranked = engine.generate(&snapshot, &BenchmarkSet::industry_default(), None);

        assert!(ranked.len() >= 5);
        for pair in ranked.items().windows(2) {
            assert!(pair[0].priority.rank() <= pair[1].priority.rank());
        }
    }
}
