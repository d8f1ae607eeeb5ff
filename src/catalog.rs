//! Catalog wiring for the application: the built-in organization set and
//! the optional remote source built from config.

use anyhow::{Context, Result};

use partner_match_core::catalog::{self, Catalog, CatalogSource, StaticCatalog};
use partner_match_core::models::Organization;

use crate::config::Config;
use crate::remote::RestCatalog;

const BUILTIN_ORGANIZATIONS: &str = include_str!("../data/organizations.json");

/// Static and remote sources for one process.
pub struct CatalogSources {
    pub static_catalog: StaticCatalog,
    pub remote: Option<RestCatalog>,
}

impl CatalogSources {
    pub fn from_config(config: &Config) -> Result<Self> {
        let static_catalog = load_static_catalog(config)?;
        let remote = match config.remote {
            Some(ref remote_cfg) => Some(RestCatalog::new(remote_cfg)?),
            None => None,
        };
        Ok(Self {
            static_catalog,
            remote,
        })
    }

    pub fn remote_source(&self) -> Option<&dyn CatalogSource> {
        self.remote.as_ref().map(|r| r as &dyn CatalogSource)
    }

    /// Build a fresh catalog snapshot (one remote call at most).
    pub async fn snapshot(&self) -> Catalog {
        catalog::load_catalog(&self.static_catalog, self.remote_source()).await
    }

    pub async fn find(&self, id: &str) -> Option<Organization> {
        catalog::find_organization(&self.static_catalog, self.remote_source(), id).await
    }
}

/// Load the static set from `[catalog].static_path`, or the built-in set.
///
/// Unlike remote rows, an invalid static record is a hard error.
pub fn load_static_catalog(config: &Config) -> Result<StaticCatalog> {
    let organizations = match config.catalog.static_path {
        Some(ref path) => {
            let content = std::fs::read_to_string(path).with_context(|| {
                format!("Failed to read static catalog: {}", path.display())
            })?;
            parse_organizations(&content)
                .with_context(|| format!("Invalid static catalog: {}", path.display()))?
        }
        None => parse_organizations(BUILTIN_ORGANIZATIONS)
            .context("Invalid built-in organization catalog")?,
    };

    tracing::debug!(count = organizations.len(), "loaded static organizations");
    Ok(StaticCatalog::new(organizations))
}

fn parse_organizations(content: &str) -> Result<Vec<Organization>> {
    let organizations: Vec<Organization> = serde_json::from_str(content)?;
    for org in &organizations {
        org.validate()?;
    }
    Ok(organizations)
}
