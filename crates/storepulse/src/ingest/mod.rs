//! Assemble a validated [`MetricSnapshot`] from a daily store-metrics CSV
//! export. Customer and inventory sections are not part of the daily export;
//! they stay empty and the corresponding evaluators simply find nothing.

mod parser;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::Duration;
use tracing::info;

use crate::analytics::snapshot::{
    CustomerBase, FunnelStage, FunnelStageKind, MetricPeriod, MetricSnapshot, RevenueBaseline,
    SnapshotParts, TrafficMetrics, ValidationError,
};
use crate::analytics::DeviceCategory;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read metrics export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid metrics CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid date '{raw}' in metrics export: {source}")]
    Date {
        raw: String,
        source: chrono::ParseError,
    },
    #[error("metrics export contained no rows")]
    Empty,
    #[error("metrics export produced an invalid snapshot: {0}")]
    Snapshot(#[from] ValidationError),
}

pub struct MetricsCsvImporter;

impl MetricsCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<MetricSnapshot, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<MetricSnapshot, ImportError> {
        let mut records = parser::parse_records(reader)?;
        if records.is_empty() {
            return Err(ImportError::Empty);
        }
        records.sort_by_key(|record| record.date);

        let start = records[0].date;
        let end = records[records.len() - 1].date;

        let mut visits = 0u64;
        let mut sessions = 0u64;
        let mut product_views = 0u64;
        let mut add_to_carts = 0u64;
        let mut checkouts = 0u64;
        let mut purchases = 0u64;
        let mut revenue_total = 0.0;
        let mut trailing_revenue = 0.0;
        let trailing_cutoff = end - Duration::days(29);

        let mut bounce_weighted = 0.0;
        let mut bounce_weight = 0u64;
        let mut channel_totals: BTreeMap<String, u64> = BTreeMap::new();
        let mut device_sums: BTreeMap<DeviceCategory, (f64, u32)> = BTreeMap::new();
        let mut observed_days = 0u32;
        let mut previous_date = None;

        for record in &records {
            if previous_date != Some(record.date) {
                observed_days += 1;
                previous_date = Some(record.date);
            }

            visits += record.visitors;
            sessions += record.sessions.unwrap_or(record.visitors);
            product_views += record.product_views;
            add_to_carts += record.add_to_carts;
            checkouts += record.checkouts;
            purchases += record.purchases;
            revenue_total += record.revenue;
            if record.date >= trailing_cutoff {
                trailing_revenue += record.revenue;
            }

            if let Some(bounce) = record.bounce_rate {
                bounce_weighted += bounce * record.visitors as f64;
                bounce_weight += record.visitors;
            }

            for (channel, channel_visits) in &record.channel_visits {
                *channel_totals.entry((*channel).to_string()).or_default() += channel_visits;
            }

            for (device, rate) in &record.device_conversion {
                let device = match *device {
                    "desktop" => DeviceCategory::Desktop,
                    "mobile" => DeviceCategory::Mobile,
                    _ => DeviceCategory::Tablet,
                };
                let entry = device_sums.entry(device).or_insert((0.0, 0));
                entry.0 += rate;
                entry.1 += 1;
            }
        }

        let bounce_rate = if bounce_weight > 0 {
            bounce_weighted / bounce_weight as f64
        } else {
            0.0
        };

        let channel_grand_total: u64 = channel_totals.values().sum();
        let channel_share = if channel_grand_total > 0 {
            channel_totals
                .into_iter()
                .map(|(channel, total)| (channel, total as f64 / channel_grand_total as f64))
                .collect()
        } else {
            BTreeMap::new()
        };

        let device_conversion = device_sums
            .into_iter()
            .map(|(device, (sum, count))| (device, sum / count as f64))
            .collect();

        let average_order_value = if purchases > 0 {
            revenue_total / purchases as f64
        } else {
            0.0
        };

        let parts = SnapshotParts {
            period: MetricPeriod { start, end },
            traffic: TrafficMetrics {
                visits,
                sessions,
                bounce_rate,
                channel_share,
            },
            funnel: vec![
                FunnelStage {
                    kind: FunnelStageKind::Visit,
                    visitors: visits,
                },
                FunnelStage {
                    kind: FunnelStageKind::ProductView,
                    visitors: product_views,
                },
                FunnelStage {
                    kind: FunnelStageKind::AddToCart,
                    visitors: add_to_carts,
                },
                FunnelStage {
                    kind: FunnelStageKind::Checkout,
                    visitors: checkouts,
                },
                FunnelStage {
                    kind: FunnelStageKind::Purchase,
                    visitors: purchases,
                },
            ],
            device_conversion,
            customers: CustomerBase {
                total: 0,
                recency: Vec::new(),
            },
            inventory: BTreeMap::new(),
            baseline: RevenueBaseline {
                trailing_30d_revenue: trailing_revenue,
                average_order_value,
                observed_days,
            },
        };

        let snapshot = MetricSnapshot::new(parts)?;
        info!(%start, %end, days = observed_days, "metrics export imported");
        Ok(snapshot)
    }
}
