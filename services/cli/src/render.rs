use serde::Serialize;
use storepulse::analytics::report::{health_score, portfolio_impact};
use storepulse::analytics::{
    BenchmarkSet, EngineConfig, MetricSnapshot, PortfolioImpactView, RankedList, StoreHealthView,
};

use crate::error::AppError;

/// Everything one analysis run produces, in one serializable envelope.
#[derive(Debug, Serialize)]
struct AnalysisOutput {
    health: StoreHealthView,
    impact: PortfolioImpactView,
    recommendations: RankedList,
}

pub(crate) fn emit(
    snapshot: &MetricSnapshot,
    benchmarks: &BenchmarkSet,
    ranked: RankedList,
    as_json: bool,
) -> Result<(), AppError> {
    let config = EngineConfig::default();
    let health = health_score(snapshot, benchmarks, &config.evaluators);
    let impact = portfolio_impact(&ranked, &config.report);

    if as_json {
        let output = AnalysisOutput {
            health,
            impact,
            recommendations: ranked,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    render_text(&health, &impact, &ranked);
    Ok(())
}

fn render_text(health: &StoreHealthView, impact: &PortfolioImpactView, ranked: &RankedList) {
    println!("Store health: {}/100", health.score);
    for entry in &health.components {
        println!(
            "  - {:<18} {:>3.0}% (weight {:.0}%)",
            entry.component,
            entry.value * 100.0,
            entry.weight * 100.0
        );
    }

    if ranked.is_empty() {
        println!("\nNo recommendations; nothing crossed a threshold this period.");
        return;
    }

    println!("\nRecommendations ({}):", ranked.len());
    for (index, item) in ranked.iter().enumerate() {
        println!(
            "{}. [{}] {} ({})",
            index + 1,
            item.priority.label(),
            item.title,
            item.category.label()
        );
        println!(
            "   impact {:.0} | effort {:.0} | confidence {:.2} | potential {:.0} | {}",
            item.impact_score,
            item.effort_score,
            item.confidence,
            item.potential_revenue,
            item.implementation_estimate
        );
        println!("   {}", item.description);
        for step in &item.remediation_steps {
            println!("   - {step}");
        }
    }

    println!(
        "\nPotential if realized: {:.0}/month ({:.0}/year), {} quick win(s), ~{} day(s) of work",
        impact.total_potential_monthly,
        impact.total_potential_annual,
        impact.quick_wins,
        impact.estimated_implementation_days
    );
}
