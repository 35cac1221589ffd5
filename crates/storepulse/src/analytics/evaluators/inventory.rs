use super::super::domain::{
    Evidence, EvidenceField, EvidenceValue, Finding, RecommendationCategory,
};
use super::super::snapshot::MetricSnapshot;
use super::{BenchmarkSet, Evaluator, EvaluatorConfig};

/// Flags stockout risks and dead stock per SKU.
pub struct InventoryEvaluator {
    config: EvaluatorConfig,
}

impl InventoryEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    fn stockout_risk(&self, sku: &str, days_of_stock: f64, trailing_revenue: f64) -> Option<Finding> {
        let reorder = self.config.reorder_days_of_stock;
        if reorder <= 0.0 || days_of_stock >= reorder {
            return None;
        }

        let shortfall = 1.0 - days_of_stock / reorder;
        let severity = (0.5 + shortfall * 0.5).clamp(0.0, 1.0);
        // Revenue the SKU would have earned over the uncovered days.
        let at_risk = trailing_revenue / 30.0 * (reorder - days_of_stock);

        let mut evidence = Evidence::new();
        evidence.insert(EvidenceField::DaysOfStock, EvidenceValue::Decimal(days_of_stock));
        evidence.insert(EvidenceField::EstimatedRevenue, EvidenceValue::Amount(at_risk));

        Some(Finding {
            category: RecommendationCategory::Inventory,
            title: format!("Replenish {sku} before it stocks out"),
            description: format!(
                "{sku} has {days_of_stock:.0} days of stock left at current velocity; \
                 the reorder threshold is {reorder:.0} days."
            ),
            severity,
            evidence,
            subject: Some(sku.to_string()),
            remediation_steps: vec![
                "Raise a replenishment order sized to current velocity".to_string(),
                "Set a low-stock alert at the reorder threshold".to_string(),
                "Enable backorders while stock rebuilds".to_string(),
            ],
            implementation_estimate: "Immediate".to_string(),
        })
    }

    fn dead_stock(&self, sku: &str, sell_through: f64) -> Option<Finding> {
        let threshold = self.config.dead_stock_sell_through;
        if threshold <= 0.0 || sell_through >= threshold {
            return None;
        }

        let severity = (0.3 + (threshold - sell_through) / threshold * 0.4).clamp(0.0, 1.0);

        let mut evidence = Evidence::new();
        evidence.insert(
            EvidenceField::SellThroughRate,
            EvidenceValue::Decimal(sell_through),
        );

        Some(Finding {
            category: RecommendationCategory::Inventory,
            title: format!("Clear dead stock on {sku}"),
            description: format!(
                "{sku} is selling through at {:.0}%, under the {:.0}% floor, and is \
                 tying up working capital.",
                sell_through * 100.0,
                threshold * 100.0
            ),
            severity,
            evidence,
            subject: Some(sku.to_string()),
            remediation_steps: vec![
                "Bundle the slow mover with a top seller".to_string(),
                "Run a clearance markdown on aging units".to_string(),
                "Cut the reorder quantity for the SKU".to_string(),
            ],
            implementation_estimate: "3 days".to_string(),
        })
    }
}

impl Evaluator for InventoryEvaluator {
    fn key(&self) -> &'static str {
        "inventory"
    }

    fn evaluate(&self, snapshot: &MetricSnapshot, _benchmarks: &BenchmarkSet) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (sku, stock) in &snapshot.inventory {
            if let Some(finding) =
                self.stockout_risk(sku, stock.days_of_stock, stock.trailing_revenue)
            {
                findings.push(finding);
            }
            if let Some(finding) = self.dead_stock(sku, stock.sell_through_rate) {
                findings.push(finding);
            }
        }
        findings
    }
}
