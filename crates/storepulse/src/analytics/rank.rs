use serde::{Deserialize, Serialize};

use super::scoring::ScoredRecommendation;

/// Final ordered, deduplicated recommendation list. Created fresh per call;
/// persistence, if any, is the caller's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedList {
    items: Vec<ScoredRecommendation>,
}

impl RankedList {
    pub fn items(&self) -> &[ScoredRecommendation] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ScoredRecommendation> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredRecommendation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for RankedList {
    type Item = ScoredRecommendation;
    type IntoIter = std::vec::IntoIter<ScoredRecommendation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Merge, deduplicate, and order scored recommendations.
///
/// Sort key: priority rank, impact descending, potential revenue descending,
/// then stable input order. Truncation to `limit` happens strictly after the
/// sort so a cap can never hide a higher-ranked item.
pub fn rank(scored: Vec<ScoredRecommendation>, limit: Option<usize>) -> RankedList {
    let mut kept: Vec<(usize, ScoredRecommendation)> = Vec::with_capacity(scored.len());

    for (index, candidate) in scored.into_iter().enumerate() {
        let duplicates: Vec<usize> = kept
            .iter()
            .enumerate()
            .filter(|(_, (_, existing))| is_duplicate(existing, &candidate))
            .map(|(position, _)| position)
            .collect();

        if duplicates.is_empty() {
            kept.push((index, candidate));
            continue;
        }

        let best_existing = duplicates
            .iter()
            .map(|position| kept[*position].1.impact_score)
            .fold(f64::NEG_INFINITY, f64::max);

        // Keep the higher-impact duplicate; on an exact tie the earlier one wins.
        if candidate.impact_score > best_existing {
            for position in duplicates.into_iter().rev() {
                kept.remove(position);
            }
            kept.push((index, candidate));
        }
    }

    kept.sort_by(|(a_index, a), (b_index, b)| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.impact_score.total_cmp(&a.impact_score))
            .then_with(|| b.potential_revenue.total_cmp(&a.potential_revenue))
            .then_with(|| a_index.cmp(b_index))
    });

    let mut items: Vec<ScoredRecommendation> =
        kept.into_iter().map(|(_, item)| item).collect();
    if let Some(limit) = limit {
        items.truncate(limit);
    }

    RankedList { items }
}

/// Two recommendations collide when they make the same claim: same category
/// with titles that normalize to the same string, or both anchored to the
/// same primary metric key (e.g. the same SKU).
fn is_duplicate(a: &ScoredRecommendation, b: &ScoredRecommendation) -> bool {
    if a.category == b.category && normalize_title(&a.title) == normalize_title(&b.title) {
        return true;
    }

    match (&a.subject, &b.subject) {
        (Some(left), Some(right)) => !left.is_empty() && left == right,
        _ => false,
    }
}

fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
