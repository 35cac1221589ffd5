use crate::analytics::domain::{Evidence, Priority, RecommendationCategory};
use crate::analytics::rank::rank;
use crate::analytics::scoring::ScoredRecommendation;

fn rec(
    category: RecommendationCategory,
    title: &str,
    priority: Priority,
    impact: f64,
    revenue: f64,
) -> ScoredRecommendation {
    ScoredRecommendation {
        category,
        title: title.to_string(),
        description: format!("{title} (details)"),
        priority,
        impact_score: impact,
        effort_score: 30.0,
        confidence: 0.9,
        potential_revenue: revenue,
        implementation_estimate: "1 day".to_string(),
        remediation_steps: vec!["Do the thing".to_string()],
        evidence: Evidence::new(),
        subject: None,
    }
}

fn with_subject(mut item: ScoredRecommendation, subject: &str) -> ScoredRecommendation {
    item.subject = Some(subject.to_string());
    item
}

#[test]
fn sorts_by_priority_then_impact_then_revenue() {
    let ranked = rank(
        vec![
            rec(RecommendationCategory::Traffic, "a", Priority::Medium, 60.0, 100.0),
            rec(RecommendationCategory::Retention, "b", Priority::Critical, 90.0, 500.0),
            rec(RecommendationCategory::Conversion, "c", Priority::High, 75.0, 0.0),
            rec(RecommendationCategory::Inventory, "d", Priority::High, 75.0, 900.0),
            rec(RecommendationCategory::Revenue, "e", Priority::High, 80.0, 0.0),
        ],
        None,
    );

    let titles: Vec<&str> = ranked.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["b", "e", "d", "c", "a"]);
}

#[test]
fn ties_keep_input_order() {
    let ranked = rank(
        vec![
            rec(RecommendationCategory::Traffic, "first", Priority::Medium, 50.0, 0.0),
            rec(RecommendationCategory::Retention, "second", Priority::Medium, 50.0, 0.0),
        ],
        None,
    );

    let titles: Vec<&str> = ranked.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["first", "second"]);
}

#[test]
fn duplicate_titles_keep_the_higher_impact_copy() {
    let ranked = rank(
        vec![
            rec(
                RecommendationCategory::Conversion,
                "Fix Checkout  Abandonment",
                Priority::Medium,
                55.0,
                0.0,
            ),
            rec(
                RecommendationCategory::Conversion,
                "fix checkout abandonment",
                Priority::High,
                75.0,
                0.0,
            ),
        ],
        None,
    );

    assert_eq!(ranked.len(), 1);
    assert!((ranked.items()[0].impact_score - 75.0).abs() < 1e-9);
}

#[test]
fn same_title_in_another_category_is_not_a_duplicate() {
    let ranked = rank(
        vec![
            rec(RecommendationCategory::Conversion, "Same title", Priority::Medium, 55.0, 0.0),
            rec(RecommendationCategory::Traffic, "Same title", Priority::Medium, 50.0, 0.0),
        ],
        None,
    );

    assert_eq!(ranked.len(), 2);
}

#[test]
fn findings_on_the_same_subject_are_deduplicated() {
    let ranked = rank(
        vec![
            with_subject(
                rec(RecommendationCategory::Inventory, "Replenish denim-jacket", Priority::Medium, 45.0, 950.0),
                "denim-jacket",
            ),
            with_subject(
                rec(RecommendationCategory::Inventory, "Clear dead stock on denim-jacket", Priority::Low, 28.0, 0.0),
                "denim-jacket",
            ),
        ],
        None,
    );

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked.items()[0].title, "Replenish denim-jacket");
}

#[test]
fn limit_truncates_after_sorting() {
    let ranked = rank(
        vec![
            rec(RecommendationCategory::Traffic, "low-1", Priority::Low, 20.0, 0.0),
            rec(RecommendationCategory::Traffic, "low-2", Priority::Low, 25.0, 0.0),
            rec(RecommendationCategory::Retention, "high", Priority::High, 75.0, 0.0),
            rec(RecommendationCategory::Conversion, "critical", Priority::Critical, 90.0, 0.0),
            rec(RecommendationCategory::Inventory, "medium", Priority::Medium, 50.0, 0.0),
        ],
        Some(2),
    );

    let titles: Vec<&str> = ranked.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["critical", "high"]);
}

#[test]
fn ranking_is_idempotent() {
    let input = vec![
        rec(RecommendationCategory::Traffic, "a", Priority::Medium, 60.0, 100.0),
        rec(RecommendationCategory::Retention, "b", Priority::Critical, 90.0, 500.0),
        rec(RecommendationCategory::Conversion, "A", Priority::High, 75.0, 0.0),
    ];

    let once = rank(input, None);
    let twice = rank(once.items().to_vec(), None);
    assert_eq!(once, twice);
}

#[test]
fn empty_input_ranks_to_an_empty_list() {
    let ranked = rank(Vec::new(), Some(5));
    assert!(ranked.is_empty());
}
