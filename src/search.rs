//! Application-level search entry points.
//!
//! The algorithm (filter, score, rank) lives in
//! `partner_match_core::search`. This wrapper builds the catalog snapshot
//! from config and formats results for the CLI.

use anyhow::Result;

pub use partner_match_core::models::{SearchParams, SearchResponse, SearchResult};
use partner_match_core::score::HeuristicScorer;

use crate::catalog::CatalogSources;
use crate::config::Config;

/// Core search function returning structured results.
///
/// Shared by `pmatch search` and `GET /api/search`.
pub async fn search_organizations(
    sources: &CatalogSources,
    params: &SearchParams,
) -> SearchResponse {
    let catalog = sources.snapshot().await;
    tracing::debug!(
        organizations = catalog.organizations.len(),
        degraded = catalog.is_degraded(),
        "searching catalog snapshot"
    );
    partner_match_core::search::search(&catalog.organizations, params, &HeuristicScorer)
}

/// CLI entry point: runs the search and prints results to stdout.
pub async fn run_search(config: &Config, params: SearchParams, json: bool) -> Result<()> {
    let sources = CatalogSources::from_config(config)?;
    let response = search_organizations(&sources, &params).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.organizations.is_empty() {
        println!("No results.");
        return Ok(());
    }

    println!("{} organizations (sort: {:?})", response.total, params.sort_by);
    println!();

    for (i, result) in response.organizations.iter().enumerate() {
        print_result(i + 1, result);
    }

    Ok(())
}

pub(crate) fn print_result(rank: usize, result: &SearchResult) {
    let org = &result.organization;
    println!(
        "{}. [{:>3}] {} ({})",
        rank, result.alignment_score, org.name, org.org_type
    );
    println!("    region: {}", org.region);
    println!("    focus: {}", org.focus_areas.join(", "));
    println!(
        "    funding: {}  confidence: {}  verification: {}",
        org.funding_type, org.confidence, org.verification_status
    );
    if let Some(ref ex) = result.explain {
        println!(
            "    scoring: base={} focus=+{} region=+{} funding=+{} verified=+{} → raw={} × {:.2} = {}",
            ex.base,
            ex.focus_area_bonus,
            ex.region_bonus,
            ex.funding_type_bonus,
            ex.verified_bonus,
            ex.raw_score,
            ex.confidence_multiplier,
            ex.final_score
        );
    }
    println!("    id: {}", org.id);
    println!();
}
