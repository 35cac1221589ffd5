//! Diagnostic recommendation scoring for store metrics: rule evaluators emit
//! findings, the scorer turns them into impact/effort-scored recommendations,
//! and the ranker produces one deduplicated, deterministically ordered list.

pub mod domain;
pub mod evaluators;
pub mod rank;
pub mod report;
pub mod scoring;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use domain::{
    DeviceCategory, Evidence, EvidenceField, EvidenceValue, Finding, Priority,
    RecommendationCategory,
};
pub use evaluators::{BenchmarkSet, Evaluator, EvaluatorConfig};
pub use rank::{rank, RankedList};
pub use report::{PortfolioImpactView, ReportConfig, StoreHealthView};
pub use scoring::{DataInsufficientError, ScoredRecommendation, Scorer, ScoringConfig};
pub use snapshot::{
    CustomerBase, FunnelStage, FunnelStageKind, MetricPeriod, MetricSnapshot, RecencyBucket,
    RevenueBaseline, SkuInventory, SnapshotParts, TrafficMetrics, ValidationError,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Evaluator thresholds, scoring rubric, and report dials in one value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub evaluators: EvaluatorConfig,
    pub scoring: ScoringConfig,
    pub report: ReportConfig,
}

/// Stateless engine composing the evaluators, scorer, and ranker.
///
/// Holds no mutable state across calls; a single instance can serve any
/// number of concurrent callers as long as each call gets its own snapshot.
pub struct RecommendationEngine {
    scorer: Scorer,
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl RecommendationEngine {
    /// Engine with the four built-in evaluators.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_evaluators(config, evaluators::built_in(config.evaluators))
    }

    /// Engine with a caller-supplied evaluator set.
    pub fn with_evaluators(config: EngineConfig, evaluators: Vec<Box<dyn Evaluator>>) -> Self {
        Self {
            scorer: Scorer::new(config.scoring),
            evaluators,
        }
    }

    /// Add an evaluator; the ranker needs no knowledge of it.
    pub fn register(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluators.push(evaluator);
    }

    /// Run every evaluator over the snapshot, score the findings, and return
    /// the ranked list. Findings the scorer rejects are dropped and logged;
    /// the remaining findings still produce a full result.
    pub fn generate(
        &self,
        snapshot: &MetricSnapshot,
        benchmarks: &BenchmarkSet,
        limit: Option<usize>,
    ) -> RankedList {
        let mut scored = Vec::new();

        for evaluator in &self.evaluators {
            let findings = evaluator.evaluate(snapshot, benchmarks);
            debug!(
                evaluator = evaluator.key(),
                findings = findings.len(),
                "evaluator pass complete"
            );

            for finding in findings {
                match self.scorer.score(&finding, &snapshot.baseline) {
                    Ok(recommendation) => scored.push(recommendation),
                    Err(err) => {
                        debug!(evaluator = evaluator.key(), %err, "dropping unscorable finding");
                    }
                }
            }
        }

        rank(scored, limit)
    }
}

/// One-shot entry point with the default configuration.
pub fn generate_recommendations(
    snapshot: &MetricSnapshot,
    benchmarks: &BenchmarkSet,
    limit: Option<usize>,
) -> RankedList {
    RecommendationEngine::new(EngineConfig::default()).generate(snapshot, benchmarks, limit)
}
