use super::super::domain::Priority;
use super::super::evaluators::{BenchmarkSet, EvaluatorConfig};
use super::super::rank::RankedList;
use super::super::snapshot::MetricSnapshot;
use super::views::{HealthComponentEntry, PortfolioImpactView, StoreHealthView};
use super::ReportConfig;

pub(crate) fn portfolio_impact(ranked: &RankedList, config: &ReportConfig) -> PortfolioImpactView {
    let mut total_potential = 0.0;
    let mut critical_potential = 0.0;
    let mut effort_total = 0.0;
    let mut quick_wins = 0;

    for item in ranked.iter() {
        total_potential += item.potential_revenue;
        if item.priority == Priority::Critical {
            critical_potential += item.potential_revenue;
        }
        if item.effort_score < config.quick_win_effort {
            quick_wins += 1;
        }
        effort_total += item.effort_score;
    }

    let total_potential_monthly = total_potential * config.realization_factor;

    PortfolioImpactView {
        recommendation_count: ranked.len(),
        total_potential_monthly,
        total_potential_annual: total_potential_monthly * 12.0,
        critical_potential: critical_potential * config.realization_factor,
        quick_wins,
        estimated_implementation_days: (effort_total / 10.0).round() as u32,
    }
}

/// Weighted store health: conversion vs benchmark 30%, funnel efficiency 25%,
/// retention 20%, bounce 15%, inventory 10%.
pub(crate) fn health_score(
    snapshot: &MetricSnapshot,
    benchmarks: &BenchmarkSet,
    thresholds: &EvaluatorConfig,
) -> StoreHealthView {
    let conversion = snapshot
        .overall_conversion()
        .map(|rate| ratio_score(rate, benchmarks.conversion_rate))
        .unwrap_or(0.0);

    let funnel = snapshot
        .checkout_dropoff()
        .map(|dropoff| ratio_score(1.0 - dropoff, benchmarks.checkout_completion_rate))
        .unwrap_or(0.0);

    let retention = if snapshot.customers.total == 0 {
        0.5
    } else {
        let (dormant, _) = snapshot.dormant_cohort(thresholds.dormant_age_days);
        1.0 - dormant as f64 / snapshot.customers.total as f64
    };

    let bounce = if snapshot.traffic.bounce_rate <= 0.0 {
        1.0
    } else {
        ratio_score(benchmarks.bounce_rate, snapshot.traffic.bounce_rate)
    };

    let inventory = if snapshot.inventory.is_empty() {
        0.5
    } else {
        let healthy = snapshot
            .inventory
            .values()
            .filter(|stock| {
                stock.days_of_stock >= thresholds.reorder_days_of_stock
                    && stock.sell_through_rate >= thresholds.dead_stock_sell_through
            })
            .count();
        healthy as f64 / snapshot.inventory.len() as f64
    };

    let components = vec![
        HealthComponentEntry {
            component: "conversion",
            weight: 0.30,
            value: conversion,
        },
        HealthComponentEntry {
            component: "funnel_efficiency",
            weight: 0.25,
            value: funnel,
        },
        HealthComponentEntry {
            component: "retention",
            weight: 0.20,
            value: retention,
        },
        HealthComponentEntry {
            component: "engagement",
            weight: 0.15,
            value: bounce,
        },
        HealthComponentEntry {
            component: "inventory",
            weight: 0.10,
            value: inventory,
        },
    ];

    let score = components
        .iter()
        .map(|entry| entry.weight * entry.value)
        .sum::<f64>()
        .clamp(0.0, 1.0);

    StoreHealthView {
        score: (score * 100.0).round() as u8,
        components,
    }
}

/// Maps actual/target onto [0, 1], saturating at 1.5x the target.
fn ratio_score(actual: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (actual / target).clamp(0.0, 1.5) / 1.5
}
