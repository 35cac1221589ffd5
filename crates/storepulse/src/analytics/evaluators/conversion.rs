use super::super::domain::{
    DeviceCategory, Evidence, EvidenceField, EvidenceValue, Finding, RecommendationCategory,
};
use super::super::snapshot::{FunnelStageKind, MetricSnapshot};
use super::{BenchmarkSet, Evaluator, EvaluatorConfig};

/// Share of revenue lost to abandonment that a checkout fix is assumed to recover.
const ABANDONMENT_RECOVERY_FACTOR: f64 = 0.6;

/// Flags checkout-abandonment spikes and device conversion gaps.
pub struct ConversionEvaluator {
    config: EvaluatorConfig,
}

impl ConversionEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    fn checkout_abandonment(&self, snapshot: &MetricSnapshot) -> Option<Finding> {
        let dropoff = snapshot.checkout_dropoff()?;
        let threshold = self.config.checkout_abandonment_threshold;
        if dropoff <= threshold {
            return None;
        }

        let checkouts = snapshot.stage_visitors(FunnelStageKind::Checkout);
        let at_risk = dropoff * checkouts as f64 * snapshot.baseline.average_order_value;
        let recoverable = at_risk * ABANDONMENT_RECOVERY_FACTOR;

        let severity = (0.75 + (dropoff - threshold) / (1.0 - threshold) * 0.25).clamp(0.0, 1.0);

        let mut evidence = Evidence::new();
        evidence.insert(EvidenceField::CheckoutDropoff, EvidenceValue::Decimal(dropoff));
        evidence.insert(EvidenceField::EstimatedRevenue, EvidenceValue::Amount(recoverable));

        Some(Finding {
            category: RecommendationCategory::Conversion,
            title: "Fix checkout abandonment spike".to_string(),
            description: format!(
                "{:.0}% of started checkouts never complete, against a {:.0}% tolerance. \
                 Roughly {:.0} in revenue sits at risk each period.",
                dropoff * 100.0,
                threshold * 100.0,
                at_risk
            ),
            severity,
            evidence,
            subject: None,
            remediation_steps: vec![
                "Surface shipping costs before the payment step".to_string(),
                "Offer a free-shipping threshold on the cart page".to_string(),
                "Trim optional fields from the checkout form".to_string(),
            ],
            implementation_estimate: "2 days".to_string(),
        })
    }

    fn device_gap(&self, snapshot: &MetricSnapshot) -> Option<Finding> {
        let desktop = *snapshot.device_conversion.get(&DeviceCategory::Desktop)?;
        let mobile = *snapshot.device_conversion.get(&DeviceCategory::Mobile)?;
        if desktop <= 0.0 {
            return None;
        }

        let gap = 1.0 - mobile / desktop;
        if gap <= self.config.device_gap_threshold {
            return None;
        }

        let severity = (0.5 + (gap - self.config.device_gap_threshold) * 1.5).clamp(0.0, 1.0);

        let mut evidence = Evidence::new();
        evidence.insert(EvidenceField::ConversionGap, EvidenceValue::Decimal(gap));
        evidence.insert(
            EvidenceField::MobileConversionRate,
            EvidenceValue::Decimal(mobile),
        );
        evidence.insert(
            EvidenceField::DesktopConversionRate,
            EvidenceValue::Decimal(desktop),
        );

        Some(Finding {
            category: RecommendationCategory::Conversion,
            title: "Close the mobile conversion gap".to_string(),
            description: format!(
                "Mobile converts at {:.1}% versus {:.1}% on desktop, a {:.0}% relative shortfall.",
                mobile * 100.0,
                desktop * 100.0,
                gap * 100.0
            ),
            severity,
            evidence,
            subject: None,
            remediation_steps: vec![
                "Compress hero and gallery images on product pages".to_string(),
                "Move the primary call to action above the fold".to_string(),
                "Add a sticky add-to-cart bar on mobile".to_string(),
            ],
            implementation_estimate: "3 days".to_string(),
        })
    }
}

impl Evaluator for ConversionEvaluator {
    fn key(&self) -> &'static str {
        "conversion"
    }

    fn evaluate(&self, snapshot: &MetricSnapshot, _benchmarks: &BenchmarkSet) -> Vec<Finding> {
        self.checkout_abandonment(snapshot)
            .into_iter()
            .chain(self.device_gap(snapshot))
            .collect()
    }
}
