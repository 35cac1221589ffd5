mod conversion;
mod inventory;
mod retention;
mod traffic;

pub use conversion::ConversionEvaluator;
pub use inventory::InventoryEvaluator;
pub use retention::RetentionEvaluator;
pub use traffic::TrafficEvaluator;

use serde::{Deserialize, Serialize};

use super::domain::Finding;
use super::snapshot::MetricSnapshot;

/// Detector for one class of store problem.
///
/// Implementations are pure: they never mutate the snapshot and return an
/// empty vector when nothing is wrong. New evaluators can be registered on
/// the engine without touching the scorer or ranker.
pub trait Evaluator: Send + Sync {
    fn key(&self) -> &'static str;

    fn evaluate(&self, snapshot: &MetricSnapshot, benchmarks: &BenchmarkSet) -> Vec<Finding>;
}

/// Industry or peer-store comparison values supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSet {
    /// Typical visit-to-purchase conversion rate.
    pub conversion_rate: f64,
    /// Typical bounce rate.
    pub bounce_rate: f64,
    /// Largest acquisition-channel share considered healthy.
    pub max_channel_share: f64,
    /// Typical share of started checkouts that complete.
    pub checkout_completion_rate: f64,
}

impl BenchmarkSet {
    /// Aggregate small-retail benchmarks used when no peer data is supplied.
    pub fn industry_default() -> Self {
        Self {
            conversion_rate: 0.032,
            bounce_rate: 0.47,
            max_channel_share: 0.50,
            checkout_completion_rate: 0.65,
        }
    }
}

/// Thresholds driving the built-in evaluators. Passed explicitly so the
/// evaluators stay side-effect-free and callers can tune per store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Checkout drop-off (`1 - purchase/checkout`) above this flags abandonment.
    pub checkout_abandonment_threshold: f64,
    /// Relative mobile-vs-desktop conversion shortfall that flags a device gap.
    pub device_gap_threshold: f64,
    /// Days since last order before a customer counts as dormant.
    pub dormant_age_days: u32,
    /// Dormant share of the customer base that flags a win-back opportunity.
    pub dormant_share_threshold: f64,
    /// Fraction of dormant customers a win-back campaign is assumed to recover.
    pub winback_recovery_rate: f64,
    /// Relative excess over the benchmark bounce rate that flags an anomaly.
    pub bounce_rate_margin: f64,
    /// Sell-through rate below this marks a SKU as dead stock.
    pub dead_stock_sell_through: f64,
    /// Days of stock below this marks a SKU as a stockout risk.
    pub reorder_days_of_stock: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            checkout_abandonment_threshold: 0.35,
            device_gap_threshold: 0.15,
            dormant_age_days: 90,
            dormant_share_threshold: 0.10,
            winback_recovery_rate: 0.10,
            bounce_rate_margin: 0.15,
            dead_stock_sell_through: 0.20,
            reorder_days_of_stock: 14.0,
        }
    }
}

/// The four evaluators shipped with the engine.
pub fn built_in(config: EvaluatorConfig) -> Vec<Box<dyn Evaluator>> {
    vec![
        Box::new(ConversionEvaluator::new(config)),
        Box::new(RetentionEvaluator::new(config)),
        Box::new(TrafficEvaluator::new(config)),
        Box::new(InventoryEvaluator::new(config)),
    ]
}
