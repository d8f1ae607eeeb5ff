//! Catalog source status listing (`pmatch sources`).

use anyhow::Result;

use partner_match_core::catalog::CatalogSource;

use crate::catalog::CatalogSources;
use crate::config::Config;

pub async fn list_sources(config: &Config) -> Result<()> {
    let sources = CatalogSources::from_config(config)?;

    let static_origin = match config.catalog.static_path {
        Some(ref p) => p.display().to_string(),
        None => "built-in".to_string(),
    };

    println!("{:<10} {:<12} {:<8} ORIGIN", "SOURCE", "STATUS", "COUNT");
    println!(
        "{:<10} {:<12} {:<8} {}",
        "static",
        "OK",
        sources.static_catalog.len(),
        static_origin
    );

    match sources.remote {
        None => println!("{:<10} {:<12} {:<8} -", "remote", "DISABLED", "-"),
        Some(ref remote) => match remote.fetch_all().await {
            Ok(orgs) => println!(
                "{:<10} {:<12} {:<8} {}",
                "remote",
                "OK",
                orgs.len(),
                remote.endpoint()
            ),
            Err(e) => {
                println!(
                    "{:<10} {:<12} {:<8} {}",
                    "remote",
                    "UNHEALTHY",
                    "-",
                    remote.endpoint()
                );
                println!("  error: {}", e);
            }
        },
    }

    Ok(())
}
