//! Export the catalog as JSON for a static client.
//!
//! Produces an array of baseline-scored search results (the same shape
//! `GET /api/organizations/{id}` returns) wrapped with a generation
//! timestamp, so a front end can render the directory without the server.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use partner_match_core::models::SearchResult;
use partner_match_core::score::HeuristicScorer;
use partner_match_core::search::score_baseline;

use crate::catalog::CatalogSources;
use crate::config::Config;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportData {
    generated_at: DateTime<Utc>,
    total: usize,
    organizations: Vec<SearchResult>,
}

/// Export organizations as JSON.
///
/// The static set is always exported; `with_remote` appends the remote
/// set (degrading to static-only if the remote is unavailable). If
/// `output` is `Some`, writes to that file path, otherwise to stdout.
pub async fn run_export(config: &Config, output: Option<&Path>, with_remote: bool) -> Result<()> {
    let sources = CatalogSources::from_config(config)?;

    let organizations = if with_remote {
        sources.snapshot().await.organizations
    } else {
        sources.static_catalog.organizations().to_vec()
    };

    let results: Vec<SearchResult> = organizations
        .iter()
        .map(|org| score_baseline(org, &HeuristicScorer))
        .collect();

    let data = ExportData {
        generated_at: Utc::now(),
        total: results.len(),
        organizations: results,
    };
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            tracing::info!(count = data.total, path = %path.display(), "exported organizations");
            eprintln!("Exported {} organizations to {}", data.total, path.display());
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
