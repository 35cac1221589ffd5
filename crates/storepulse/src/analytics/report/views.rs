use serde::Serialize;

/// Realized-potential rollup across a ranked recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioImpactView {
    pub recommendation_count: usize,
    /// Sum of revenue estimates discounted by the realization factor.
    pub total_potential_monthly: f64,
    pub total_potential_annual: f64,
    /// Discounted potential sitting in the critical bucket alone.
    pub critical_potential: f64,
    /// Recommendations cheap enough to ship immediately.
    pub quick_wins: usize,
    pub estimated_implementation_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthComponentEntry {
    pub component: &'static str,
    pub weight: f64,
    /// Component value in [0, 1].
    pub value: f64,
}

/// Weighted 0-100 store health rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreHealthView {
    pub score: u8,
    pub components: Vec<HealthComponentEntry>,
}
