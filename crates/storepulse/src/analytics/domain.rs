use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Problem categories a recommendation can belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Conversion,
    Retention,
    Revenue,
    Traffic,
    Inventory,
}

impl RecommendationCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Conversion,
            Self::Retention,
            Self::Revenue,
            Self::Traffic,
            Self::Inventory,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Conversion => "conversion",
            Self::Retention => "retention",
            Self::Revenue => "revenue",
            Self::Traffic => "traffic",
            Self::Inventory => "inventory",
        }
    }
}

/// Priority buckets derived deterministically from impact and effort scores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn ordered() -> [Self; 4] {
        [Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    /// Sort rank, lower sorts first.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Device classes the storefront reports conversion rates for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    Desktop,
    Mobile,
    Tablet,
}

impl DeviceCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
        }
    }
}

/// Metric fields an evaluator can attach to a finding so scoring consumes
/// structured values instead of reparsing description text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceField {
    CheckoutDropoff,
    MobileConversionRate,
    DesktopConversionRate,
    ConversionGap,
    DormantCustomers,
    DormantShare,
    CohortAvgOrderValue,
    BounceRate,
    BenchmarkBounceRate,
    ChannelShare,
    DaysOfStock,
    SellThroughRate,
    EstimatedRevenue,
}

/// Value representation for an evidence field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvidenceValue {
    Decimal(f64),
    Count(u64),
    Amount(f64),
    Text(String),
}

impl EvidenceValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Decimal(value) | Self::Amount(value) => Some(*value),
            Self::Count(value) => Some(*value as f64),
            Self::Text(_) => None,
        }
    }
}

/// Structured payload of the metric values that triggered a finding.
pub type Evidence = BTreeMap<EvidenceField, EvidenceValue>;

/// Raw observation emitted by a rule evaluator, owned by the evaluator until
/// it is consumed by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    /// Severity hint in [0, 1] assigned by the emitting evaluator.
    pub severity: f64,
    pub evidence: Evidence,
    /// Primary metric key the finding is anchored to (a SKU, a channel name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remediation_steps: Vec<String>,
    pub implementation_estimate: String,
}

impl Finding {
    pub fn evidence_value(&self, field: EvidenceField) -> Option<f64> {
        self.evidence.get(&field).and_then(EvidenceValue::as_f64)
    }
}
