//! Single-organization lookup.
//!
//! Used by `pmatch get` and `GET /api/organizations/{id}`. The result is
//! scored against an empty query, so only the verification bonus and
//! the confidence discount apply.

use anyhow::{bail, Result};

use partner_match_core::models::SearchResult;
use partner_match_core::score::HeuristicScorer;
use partner_match_core::search::score_baseline;

use crate::catalog::CatalogSources;
use crate::config::Config;

/// Look up `id` in the static set, then the remote source.
///
/// Returns `None` when the organization exists in neither.
pub async fn get_organization(sources: &CatalogSources, id: &str) -> Option<SearchResult> {
    let org = sources.find(id).await?;
    Some(score_baseline(&org, &HeuristicScorer))
}

/// CLI entry point: prints the organization or fails when it is unknown.
pub async fn run_get(config: &Config, id: &str, json: bool) -> Result<()> {
    let sources = CatalogSources::from_config(config)?;
    let result = match get_organization(&sources, id).await {
        Some(r) => r,
        None => bail!("organization not found: {}", id),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let org = &result.organization;
    println!("--- Organization ---");
    println!("id:            {}", org.id);
    println!("name:          {}", org.name);
    println!("type:          {}", org.org_type);
    if let Some(ref website) = org.website {
        println!("website:       {}", website);
    }
    println!("headquarters:  {}", org.headquarters);
    println!("region:        {}", org.region);
    println!("focus areas:   {}", org.focus_areas.join(", "));
    println!("funding:       {}", org.funding_type);
    println!("verification:  {}", org.verification_status);
    println!("confidence:    {}", org.confidence);
    println!("alignment:     {}", result.alignment_score);
    println!();

    println!("--- Mission ---");
    println!("{}", org.mission);
    println!();
    println!("--- Description ---");
    println!("{}", org.description);

    if !org.projects.is_empty() {
        println!();
        println!("--- Projects ({}) ---", org.projects.len());
        for p in &org.projects {
            println!("- {}", p);
        }
    }
    if !org.partner_history.is_empty() {
        println!();
        println!("--- Partner history ---");
        for p in &org.partner_history {
            println!("- {}", p);
        }
    }
    if !org.target_beneficiaries.is_empty() {
        println!();
        println!("--- Target beneficiaries ---");
        for b in &org.target_beneficiaries {
            println!("- {}", b);
        }
    }

    Ok(())
}
