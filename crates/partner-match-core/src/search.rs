//! Search pipeline: filter → score → rank.
//!
//! Operates on an in-memory catalog snapshot and has no failure modes of
//! its own. Callers (CLI, HTTP) obtain the snapshot from
//! [`load_catalog`](crate::catalog::load_catalog).

use crate::filter::filter;
use crate::models::{Organization, SearchParams, SearchResponse, SearchResult};
use crate::rank::rank;
use crate::score::AlignmentScorer;

/// Run one search over `catalog`.
pub fn search(
    catalog: &[Organization],
    params: &SearchParams,
    scorer: &dyn AlignmentScorer,
) -> SearchResponse {
    let mut results: Vec<SearchResult> = filter(catalog, params)
        .into_iter()
        .map(|org| score_one(org, params, scorer))
        .collect();

    rank(&mut results, params.sort_by);

    let total = results.len();
    SearchResponse {
        organizations: results,
        total,
    }
}

/// Score one organization against an empty query.
///
/// Only the verification bonus and the confidence discount apply.
pub fn score_baseline(org: &Organization, scorer: &dyn AlignmentScorer) -> SearchResult {
    score_one(org, &SearchParams::default(), scorer)
}

fn score_one(org: &Organization, params: &SearchParams, scorer: &dyn AlignmentScorer) -> SearchResult {
    let (alignment_score, explain) = if params.explain {
        let ex = scorer.explain(org, params);
        (ex.final_score, Some(ex))
    } else {
        (scorer.score(org, params), None)
    };

    SearchResult {
        organization: org.clone(),
        alignment_score,
        explain,
    }
}
