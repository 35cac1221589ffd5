use super::super::domain::{
    Evidence, EvidenceField, EvidenceValue, Finding, RecommendationCategory,
};
use super::super::snapshot::MetricSnapshot;
use super::{BenchmarkSet, Evaluator, EvaluatorConfig};

/// Flags win-back opportunities in the dormant customer cohort.
pub struct RetentionEvaluator {
    config: EvaluatorConfig,
}

impl RetentionEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }
}

impl Evaluator for RetentionEvaluator {
    fn key(&self) -> &'static str {
        "retention"
    }

    fn evaluate(&self, snapshot: &MetricSnapshot, _benchmarks: &BenchmarkSet) -> Vec<Finding> {
        if snapshot.customers.total == 0 {
            return Vec::new();
        }

        let (dormant, cohort_aov) = snapshot.dormant_cohort(self.config.dormant_age_days);
        if dormant == 0 {
            return Vec::new();
        }

        let share = dormant as f64 / snapshot.customers.total as f64;
        if share <= self.config.dormant_share_threshold {
            return Vec::new();
        }

        let recoverable = dormant as f64 * cohort_aov * self.config.winback_recovery_rate;
        let severity =
            (0.4 + (share - self.config.dormant_share_threshold) * 2.0).clamp(0.0, 1.0);

        let mut evidence = Evidence::new();
        evidence.insert(EvidenceField::DormantCustomers, EvidenceValue::Count(dormant));
        evidence.insert(EvidenceField::DormantShare, EvidenceValue::Decimal(share));
        evidence.insert(
            EvidenceField::CohortAvgOrderValue,
            EvidenceValue::Amount(cohort_aov),
        );
        evidence.insert(EvidenceField::EstimatedRevenue, EvidenceValue::Amount(recoverable));

        vec![Finding {
            category: RecommendationCategory::Retention,
            title: "Launch a win-back campaign".to_string(),
            description: format!(
                "{dormant} customers have not purchased in {}+ days ({:.0}% of the base). \
                 That cohort previously averaged {:.2} per order.",
                self.config.dormant_age_days,
                share * 100.0,
                cohort_aov
            ),
            severity,
            evidence,
            subject: None,
            remediation_steps: vec![
                "Segment customers by last purchase date".to_string(),
                "Queue a three-touch win-back email sequence".to_string(),
                "Reserve a discount for the final touch".to_string(),
            ],
            implementation_estimate: "1 day".to_string(),
        }]
    }
}
