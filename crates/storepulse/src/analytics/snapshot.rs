use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::DeviceCategory;

/// Allowed deviation when traffic channel shares are checked against 1.0.
pub const CHANNEL_SHARE_TOLERANCE: f64 = 0.01;

/// Stages of the purchase funnel in their defined order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStageKind {
    Visit,
    ProductView,
    AddToCart,
    Checkout,
    Purchase,
}

impl FunnelStageKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Visit,
            Self::ProductView,
            Self::AddToCart,
            Self::Checkout,
            Self::Purchase,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Visit => "visit",
            Self::ProductView => "product_view",
            Self::AddToCart => "add_to_cart",
            Self::Checkout => "checkout",
            Self::Purchase => "purchase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub kind: FunnelStageKind,
    pub visitors: u64,
}

/// Reporting window the snapshot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MetricPeriod {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficMetrics {
    pub visits: u64,
    pub sessions: u64,
    /// Share of single-page sessions, in [0, 1].
    pub bounce_rate: f64,
    /// Share of visits per acquisition channel; sums to 1.0 when non-empty.
    #[serde(default)]
    pub channel_share: BTreeMap<String, f64>,
}

/// Customer count bucketed by days since the last order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecencyBucket {
    pub days_since_last_order_min: u32,
    pub customers: u64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerBase {
    pub total: u64,
    #[serde(default)]
    pub recency: Vec<RecencyBucket>,
}

/// Stock signals for a single SKU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkuInventory {
    pub days_of_stock: f64,
    /// Units sold over units received, in [0, 1].
    pub sell_through_rate: f64,
    /// Revenue attributed to the SKU over the trailing 30 days.
    pub trailing_revenue: f64,
}

/// Revenue context used to normalize impact and derive confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueBaseline {
    pub trailing_30d_revenue: f64,
    pub average_order_value: f64,
    /// Days of trailing data backing the snapshot.
    pub observed_days: u32,
}

/// Unvalidated snapshot fields as supplied by the metrics collaborator.
///
/// Deserialize this from transport, then promote it with [`MetricSnapshot::new`]
/// so every snapshot handed to the engine has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotParts {
    pub period: MetricPeriod,
    pub traffic: TrafficMetrics,
    pub funnel: Vec<FunnelStage>,
    #[serde(default)]
    pub device_conversion: BTreeMap<DeviceCategory, f64>,
    pub customers: CustomerBase,
    #[serde(default)]
    pub inventory: BTreeMap<String, SkuInventory>,
    pub baseline: RevenueBaseline,
}

/// Validation failure naming the violated field.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("period start {start} is after period end {end}")]
    PeriodOrder { start: NaiveDate, end: NaiveDate },
    #[error("funnel stage at position {position} should be {expected}, found {found}")]
    FunnelShape {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("funnel is missing stages ({found} of {expected})")]
    FunnelLength { expected: usize, found: usize },
    #[error("funnel count for {stage} exceeds the preceding stage ({current} > {previous})")]
    FunnelNotMonotonic {
        stage: &'static str,
        current: u64,
        previous: u64,
    },
    #[error("traffic channel shares sum to {sum:.3}, expected 1.0 within 0.01")]
    ChannelShareSum { sum: f64 },
    #[error("{field} must lie in [0, 1], found {value}")]
    RateOutOfRange { field: String, value: f64 },
    #[error("{field} must be a finite, non-negative amount, found {value}")]
    AmountOutOfRange { field: String, value: f64 },
    #[error("recency buckets hold {bucketed} customers but the base reports {total}")]
    CustomerCounts { bucketed: u64, total: u64 },
}

/// Immutable, validated view of a store's metrics for one reporting window.
///
/// Built once per evaluation cycle; evaluators only ever borrow it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    pub period: MetricPeriod,
    pub traffic: TrafficMetrics,
    pub funnel: Vec<FunnelStage>,
    pub device_conversion: BTreeMap<DeviceCategory, f64>,
    pub customers: CustomerBase,
    pub inventory: BTreeMap<String, SkuInventory>,
    pub baseline: RevenueBaseline,
}

impl MetricSnapshot {
    pub fn new(parts: SnapshotParts) -> Result<Self, ValidationError> {
        let SnapshotParts {
            period,
            traffic,
            funnel,
            device_conversion,
            customers,
            inventory,
            baseline,
        } = parts;

        if period.start > period.end {
            return Err(ValidationError::PeriodOrder {
                start: period.start,
                end: period.end,
            });
        }

        validate_funnel(&funnel)?;
        validate_rate("traffic.bounce_rate", traffic.bounce_rate)?;
        validate_channel_share(&traffic.channel_share)?;

        for (device, rate) in &device_conversion {
            validate_rate(&format!("device_conversion.{}", device.label()), *rate)?;
        }

        let mut bucketed = 0u64;
        for bucket in &customers.recency {
            bucketed = bucketed.saturating_add(bucket.customers);
            validate_amount(
                &format!(
                    "customers.recency[{}].avg_order_value",
                    bucket.days_since_last_order_min
                ),
                bucket.avg_order_value,
            )?;
        }
        if bucketed > customers.total {
            return Err(ValidationError::CustomerCounts {
                bucketed,
                total: customers.total,
            });
        }

        for (sku, stock) in &inventory {
            validate_rate(&format!("inventory.{sku}.sell_through_rate"), stock.sell_through_rate)?;
            validate_amount(&format!("inventory.{sku}.days_of_stock"), stock.days_of_stock)?;
            validate_amount(&format!("inventory.{sku}.trailing_revenue"), stock.trailing_revenue)?;
        }

        validate_amount("baseline.trailing_30d_revenue", baseline.trailing_30d_revenue)?;
        validate_amount("baseline.average_order_value", baseline.average_order_value)?;

        Ok(Self {
            period,
            traffic,
            funnel,
            device_conversion,
            customers,
            inventory,
            baseline,
        })
    }

    pub fn stage_visitors(&self, kind: FunnelStageKind) -> u64 {
        self.funnel
            .iter()
            .find(|stage| stage.kind == kind)
            .map(|stage| stage.visitors)
            .unwrap_or(0)
    }

    /// Share of started checkouts that never complete, `1 - purchase/checkout`.
    pub fn checkout_dropoff(&self) -> Option<f64> {
        let checkouts = self.stage_visitors(FunnelStageKind::Checkout);
        if checkouts == 0 {
            return None;
        }
        let purchases = self.stage_visitors(FunnelStageKind::Purchase);
        Some(1.0 - purchases as f64 / checkouts as f64)
    }

    /// Visit-to-purchase conversion rate.
    pub fn overall_conversion(&self) -> Option<f64> {
        let visits = self.stage_visitors(FunnelStageKind::Visit);
        if visits == 0 {
            return None;
        }
        Some(self.stage_visitors(FunnelStageKind::Purchase) as f64 / visits as f64)
    }

    /// Customers whose last order is at least `min_days` old, with the
    /// visitor-weighted average order value of that cohort.
    pub fn dormant_cohort(&self, min_days: u32) -> (u64, f64) {
        let mut count = 0u64;
        let mut weighted_aov = 0.0;
        for bucket in &self.customers.recency {
            if bucket.days_since_last_order_min >= min_days {
                count += bucket.customers;
                weighted_aov += bucket.customers as f64 * bucket.avg_order_value;
            }
        }
        if count == 0 {
            (0, 0.0)
        } else {
            (count, weighted_aov / count as f64)
        }
    }
}

fn validate_funnel(funnel: &[FunnelStage]) -> Result<(), ValidationError> {
    let expected = FunnelStageKind::ordered();
    if funnel.len() != expected.len() {
        return Err(ValidationError::FunnelLength {
            expected: expected.len(),
            found: funnel.len(),
        });
    }

    for (position, (stage, kind)) in funnel.iter().zip(expected).enumerate() {
        if stage.kind != kind {
            return Err(ValidationError::FunnelShape {
                position,
                expected: kind.label(),
                found: stage.kind.label(),
            });
        }
    }

    for pair in funnel.windows(2) {
        if pair[1].visitors > pair[0].visitors {
            return Err(ValidationError::FunnelNotMonotonic {
                stage: pair[1].kind.label(),
                current: pair[1].visitors,
                previous: pair[0].visitors,
            });
        }
    }

    Ok(())
}

fn validate_channel_share(shares: &BTreeMap<String, f64>) -> Result<(), ValidationError> {
    if shares.is_empty() {
        return Ok(());
    }

    let mut sum = 0.0;
    for (channel, share) in shares {
        validate_rate(&format!("traffic.channel_share.{channel}"), *share)?;
        sum += share;
    }

    if (sum - 1.0).abs() > CHANNEL_SHARE_TOLERANCE {
        return Err(ValidationError::ChannelShareSum { sum });
    }

    Ok(())
}

fn validate_rate(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::RateOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_amount(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::AmountOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
