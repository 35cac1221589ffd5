use serde::{Deserialize, Serialize};

use super::super::domain::RecommendationCategory;

/// Weights and thresholds behind impact, effort, priority, and confidence.
///
/// Every constant in the scoring formulas lives here so callers can tune the
/// rubric per store instead of patching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points contributed by a severity of 1.0.
    pub severity_weight: f64,
    /// Points contributed by a fully-normalized revenue estimate.
    pub revenue_weight: f64,
    /// Fraction of trailing 30-day revenue at which the revenue component maxes out.
    pub revenue_norm_fraction: f64,
    /// Effort points added per remediation step.
    pub step_effort: f64,
    pub effort_conversion: f64,
    pub effort_retention: f64,
    pub effort_revenue: f64,
    pub effort_traffic: f64,
    pub effort_inventory: f64,
    /// Impact score at or above which a finding can be critical.
    pub critical_impact: f64,
    /// Effort score a critical finding must stay at or below.
    pub critical_max_effort: f64,
    pub high_impact: f64,
    pub medium_impact: f64,
    /// Width of the borderline band just under a priority threshold.
    pub borderline_margin: f64,
    /// Effort at or below which a borderline finding is promoted.
    pub borderline_effort_bar: f64,
    /// Days of history at which confidence reaches 1.0.
    pub history_target_days: u32,
    /// Below this many days of history, confidence is capped.
    pub min_history_days: u32,
    pub low_history_confidence_cap: f64,
}

impl ScoringConfig {
    pub fn base_effort(&self, category: RecommendationCategory) -> f64 {
        match category {
            RecommendationCategory::Conversion => self.effort_conversion,
            RecommendationCategory::Retention => self.effort_retention,
            RecommendationCategory::Revenue => self.effort_revenue,
            RecommendationCategory::Traffic => self.effort_traffic,
            RecommendationCategory::Inventory => self.effort_inventory,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            severity_weight: 60.0,
            revenue_weight: 40.0,
            revenue_norm_fraction: 0.25,
            step_effort: 2.0,
            effort_conversion: 45.0,
            effort_retention: 25.0,
            effort_revenue: 25.0,
            effort_traffic: 20.0,
            effort_inventory: 40.0,
            critical_impact: 85.0,
            critical_max_effort: 40.0,
            high_impact: 70.0,
            medium_impact: 45.0,
            borderline_margin: 2.0,
            borderline_effort_bar: 30.0,
            history_target_days: 30,
            min_history_days: 7,
            low_history_confidence_cap: 0.5,
        }
    }
}
