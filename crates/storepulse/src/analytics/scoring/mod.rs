mod config;

pub use config::ScoringConfig;

use serde::{Deserialize, Serialize};

use super::domain::{Evidence, EvidenceField, Finding, Priority, RecommendationCategory};
use super::snapshot::RevenueBaseline;

/// A finding the scorer could not turn into a recommendation. The engine
/// drops the finding and keeps going; this never fails a whole request.
#[derive(Debug, thiserror::Error)]
pub enum DataInsufficientError {
    #[error("trailing revenue baseline is missing or non-positive")]
    MissingRevenueBaseline,
    #[error("finding '{title}' lacks required evidence field {field:?}")]
    MissingEvidence { title: String, field: EvidenceField },
}

/// Finding plus the computed scores exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// In [0, 100].
    pub impact_score: f64,
    /// In [0, 100].
    pub effort_score: f64,
    /// In [0, 1].
    pub confidence: f64,
    /// Currency amount; 0.0 when the finding carried no estimate.
    pub potential_revenue: f64,
    pub implementation_estimate: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remediation_steps: Vec<String>,
    pub evidence: Evidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Deterministic, side-effect-free scoring of findings.
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        finding: &Finding,
        baseline: &RevenueBaseline,
    ) -> Result<ScoredRecommendation, DataInsufficientError> {
        if !baseline.trailing_30d_revenue.is_finite() || baseline.trailing_30d_revenue <= 0.0 {
            return Err(DataInsufficientError::MissingRevenueBaseline);
        }
        required_evidence(finding)?;

        let severity = finding.severity.clamp(0.0, 1.0);
        let potential_revenue = finding
            .evidence_value(EvidenceField::EstimatedRevenue)
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(0.0);

        let norm_ceiling = baseline.trailing_30d_revenue * self.config.revenue_norm_fraction;
        let revenue_component = if norm_ceiling > 0.0 {
            (potential_revenue / norm_ceiling).min(1.0)
        } else {
            0.0
        };

        let impact_score = (severity * self.config.severity_weight
            + revenue_component * self.config.revenue_weight)
            .clamp(0.0, 100.0);

        let effort_score = (self.config.base_effort(finding.category)
            + self.config.step_effort * finding.remediation_steps.len() as f64)
            .clamp(0.0, 100.0);

        let priority = self.priority(impact_score, effort_score);
        let confidence = self.confidence(baseline.observed_days);

        Ok(ScoredRecommendation {
            category: finding.category,
            title: finding.title.clone(),
            description: finding.description.clone(),
            priority,
            impact_score,
            effort_score,
            confidence,
            potential_revenue,
            implementation_estimate: finding.implementation_estimate.clone(),
            remediation_steps: finding.remediation_steps.clone(),
            evidence: finding.evidence.clone(),
            subject: finding.subject.clone(),
        })
    }

    /// Bucket assignment. A finding whose impact lands within the borderline
    /// band just under the high or medium threshold is promoted when its
    /// effort is low; lower effort always wins the higher bucket.
    fn priority(&self, impact: f64, effort: f64) -> Priority {
        let config = &self.config;
        let promoted = effort <= config.borderline_effort_bar;

        if impact >= config.critical_impact && effort <= config.critical_max_effort {
            return Priority::Critical;
        }
        if impact >= config.high_impact
            || (promoted && impact >= config.high_impact - config.borderline_margin)
        {
            return Priority::High;
        }
        if impact >= config.medium_impact
            || (promoted && impact >= config.medium_impact - config.borderline_margin)
        {
            return Priority::Medium;
        }
        Priority::Low
    }

    fn confidence(&self, observed_days: u32) -> f64 {
        let target = self.config.history_target_days.max(1);
        let confidence = (observed_days as f64 / target as f64).clamp(0.0, 1.0);
        if observed_days < self.config.min_history_days {
            confidence.min(self.config.low_history_confidence_cap)
        } else {
            confidence
        }
    }
}

/// Evidence each category's formula cannot do without. Any one of the listed
/// fields satisfies the requirement.
fn required_evidence(finding: &Finding) -> Result<(), DataInsufficientError> {
    let any_of: &[EvidenceField] = match finding.category {
        RecommendationCategory::Conversion => {
            &[EvidenceField::CheckoutDropoff, EvidenceField::ConversionGap]
        }
        RecommendationCategory::Retention => &[EvidenceField::DormantCustomers],
        RecommendationCategory::Revenue => &[EvidenceField::EstimatedRevenue],
        RecommendationCategory::Traffic => {
            &[EvidenceField::BounceRate, EvidenceField::ChannelShare]
        }
        RecommendationCategory::Inventory => {
            &[EvidenceField::DaysOfStock, EvidenceField::SellThroughRate]
        }
    };

    if any_of.iter().any(|field| finding.evidence.contains_key(field)) {
        Ok(())
    } else {
        Err(DataInsufficientError::MissingEvidence {
            title: finding.title.clone(),
            field: any_of[0],
        })
    }
}
