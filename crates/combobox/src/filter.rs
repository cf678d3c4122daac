//! Case-insensitive substring filtering over candidate labels.

use crate::candidate::Candidate;

/// Returns whether `label` contains `query` as a case-insensitive substring.
///
/// An empty query matches every label.
#[must_use]
pub fn is_match(query: &str, label: &str) -> bool {
    label.to_lowercase().contains(&query.to_lowercase())
}

/// Returns the indices of candidates whose label matches `query`, in original
/// relative order.
pub fn filter_indices<C: Candidate>(query: &str, candidates: &[C]) -> Vec<usize> {
    let query_lower = query.to_lowercase();
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.label().to_lowercase().contains(&query_lower))
        .map(|(i, _)| i)
        .collect()
}
