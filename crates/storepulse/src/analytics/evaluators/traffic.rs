use super::super::domain::{
    Evidence, EvidenceField, EvidenceValue, Finding, RecommendationCategory,
};
use super::super::snapshot::MetricSnapshot;
use super::{BenchmarkSet, Evaluator, EvaluatorConfig};

/// Flags bounce-rate and channel-concentration anomalies against benchmarks.
pub struct TrafficEvaluator {
    config: EvaluatorConfig,
}

impl TrafficEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    fn bounce_anomaly(
        &self,
        snapshot: &MetricSnapshot,
        benchmarks: &BenchmarkSet,
    ) -> Option<Finding> {
        let bounce = snapshot.traffic.bounce_rate;
        let benchmark = benchmarks.bounce_rate;
        if benchmark <= 0.0 || bounce <= benchmark * (1.0 + self.config.bounce_rate_margin) {
            return None;
        }

        let excess_rel = bounce / benchmark - 1.0;
        let severity = (0.4 + excess_rel).clamp(0.0, 1.0);

        let conversion = snapshot.overall_conversion().unwrap_or(0.0);
        let recoverable = (bounce - benchmark)
            * snapshot.traffic.visits as f64
            * conversion
            * snapshot.baseline.average_order_value;

        let mut evidence = Evidence::new();
        evidence.insert(EvidenceField::BounceRate, EvidenceValue::Decimal(bounce));
        evidence.insert(
            EvidenceField::BenchmarkBounceRate,
            EvidenceValue::Decimal(benchmark),
        );
        evidence.insert(EvidenceField::EstimatedRevenue, EvidenceValue::Amount(recoverable));

        Some(Finding {
            category: RecommendationCategory::Traffic,
            title: "Bring the bounce rate back to benchmark".to_string(),
            description: format!(
                "Bounce rate is {:.0}% against a {:.0}% benchmark, a {:.0}% relative excess.",
                bounce * 100.0,
                benchmark * 100.0,
                excess_rel * 100.0
            ),
            severity,
            evidence,
            subject: None,
            remediation_steps: vec![
                "Audit the top landing pages for speed and relevance".to_string(),
                "Align ad creative with the pages it links to".to_string(),
                "Add internal links toward high-intent pages".to_string(),
            ],
            implementation_estimate: "2 days".to_string(),
        })
    }

    fn channel_concentration(
        &self,
        snapshot: &MetricSnapshot,
        benchmarks: &BenchmarkSet,
    ) -> Option<Finding> {
        // A single-channel breakdown carries no concentration signal.
        if snapshot.traffic.channel_share.len() < 2 {
            return None;
        }

        let (channel, share) = snapshot
            .traffic
            .channel_share
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))?;
        if *share <= benchmarks.max_channel_share {
            return None;
        }

        let severity = (0.35 + (share - benchmarks.max_channel_share)).clamp(0.0, 1.0);

        let mut evidence = Evidence::new();
        evidence.insert(EvidenceField::ChannelShare, EvidenceValue::Decimal(*share));

        Some(Finding {
            category: RecommendationCategory::Traffic,
            title: format!("Reduce dependence on the {channel} channel"),
            description: format!(
                "{channel} drives {:.0}% of visits; the benchmark ceiling for a single \
                 channel is {:.0}%.",
                share * 100.0,
                benchmarks.max_channel_share * 100.0
            ),
            severity,
            evidence,
            subject: Some(channel.clone()),
            remediation_steps: vec![
                "Shift test budget into two secondary channels".to_string(),
                "Retarget the dominant channel's audience elsewhere".to_string(),
                "Track blended acquisition cost weekly".to_string(),
            ],
            implementation_estimate: "1 week".to_string(),
        })
    }
}

impl Evaluator for TrafficEvaluator {
    fn key(&self) -> &'static str {
        "traffic"
    }

    fn evaluate(&self, snapshot: &MetricSnapshot, benchmarks: &BenchmarkSet) -> Vec<Finding> {
        self.bounce_anomaly(snapshot, benchmarks)
            .into_iter()
            .chain(self.channel_concentration(snapshot, benchmarks))
            .collect()
    }
}
