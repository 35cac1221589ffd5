mod summary;
pub mod views;

use serde::{Deserialize, Serialize};

use super::evaluators::{BenchmarkSet, EvaluatorConfig};
use super::rank::RankedList;
use super::snapshot::MetricSnapshot;
pub use views::{HealthComponentEntry, PortfolioImpactView, StoreHealthView};

/// Dials for the portfolio rollup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Not every recommendation lands; potential revenue is discounted by this.
    pub realization_factor: f64,
    /// Effort score under which a recommendation counts as a quick win.
    pub quick_win_effort: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            realization_factor: 0.6,
            quick_win_effort: 30.0,
        }
    }
}

pub fn portfolio_impact(ranked: &RankedList, config: &ReportConfig) -> PortfolioImpactView {
    summary::portfolio_impact(ranked, config)
}

pub fn health_score(
    snapshot: &MetricSnapshot,
    benchmarks: &BenchmarkSet,
    thresholds: &EvaluatorConfig,
) -> StoreHealthView {
    summary::health_score(snapshot, benchmarks, thresholds)
}
