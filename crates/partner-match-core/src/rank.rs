//! Ranking stage: orders scored results by the requested key.
//!
//! Every mode uses a stable sort, so ties keep the relative order they
//! had coming out of the filter stage.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{SearchResult, SortBy};

/// Order `results` in place according to `sort_by`.
///
/// - [`SortBy::Alignment`]: descending alignment score.
/// - [`SortBy::Confidence`]: descending confidence.
/// - [`SortBy::Name`]: ascending name, ignoring case and accents.
/// - [`SortBy::Recency`]: untouched. No timestamp is scored, so the
///   filter-stage order is preserved as is.
pub fn rank(results: &mut [SearchResult], sort_by: SortBy) {
    match sort_by {
        SortBy::Alignment => results.sort_by(|a, b| b.alignment_score.cmp(&a.alignment_score)),
        SortBy::Confidence => results.sort_by(|a, b| {
            b.organization
                .confidence
                .total_cmp(&a.organization.confidence)
        }),
        SortBy::Name => {
            results.sort_by(|a, b| compare_names(&a.organization.name, &b.organization.name))
        }
        SortBy::Recency => {}
    }
}

/// Case- and accent-insensitive name ordering with the exact string as a
/// tiebreaker, so "Émile" sorts with the E's and "acme"/"Acme" still
/// sort deterministically.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Canonical decomposition with combining marks dropped, then lowercased.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
