//! Keyword filtering over article summaries.

use crate::types::article::ArticleSummary;
use crate::types::research::MatchMode;

/// Whether one summary matches the keywords (case-insensitive substring).
///
/// An empty keyword set matches everything.
pub fn matches(item: &ArticleSummary, keywords: &[String], mode: MatchMode) -> bool {
    if keywords.is_empty() {
        return true;
    }

    let blob = item.search_blob();
    let mut hits = keywords.iter().map(|kw| blob.contains(&kw.to_lowercase()));

    match mode {
        MatchMode::And => hits.all(|hit| hit),
        MatchMode::Or => hits.any(|hit| hit),
    }
}

/// Keep the items that match, preserving their order.
pub fn filter(items: Vec<ArticleSummary>, keywords: &[String], mode: MatchMode) -> Vec<ArticleSummary> {
    items
        .into_iter()
        .filter(|item| matches(item, keywords, mode))
        .collect()
}
