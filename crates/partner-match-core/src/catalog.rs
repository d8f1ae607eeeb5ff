//! Catalog abstraction: where organization records come from.
//!
//! A search runs over one in-memory snapshot built by [`load_catalog`]:
//! the built-in [`StaticCatalog`] followed by whatever a remote
//! [`CatalogSource`] returns. The merge is a plain concatenation. An
//! organization present in both sets appears twice.
//!
//! # Degradation policy
//!
//! A remote failure is never surfaced to the caller. It is logged at
//! `warn` level, recorded in [`Catalog::remote`], and the search proceeds
//! over the static set alone.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::Organization;

/// Failure to obtain organizations from a catalog source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
    #[error("catalog request timed out after {0}s")]
    Timeout(u64),
    #[error("catalog source returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode catalog response: {0}")]
    Decode(String),
}

/// A queryable collection of organization records.
///
/// Implementations must be `Send + Sync` so one source can serve
/// concurrent requests. In-memory implementations return ready futures.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short label used in logs and status output.
    fn name(&self) -> &str;

    /// Fetch every organization the source holds.
    async fn fetch_all(&self) -> Result<Vec<Organization>, FetchError>;

    /// Fetch a single organization by id.
    ///
    /// The default scans [`fetch_all`](CatalogSource::fetch_all); remote
    /// sources should override it with a keyed lookup.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Organization>, FetchError> {
        Ok(self.fetch_all().await?.into_iter().find(|o| o.id == id))
    }
}

/// The curated organization set shipped with the application.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    organizations: Vec<Organization>,
}

impl StaticCatalog {
    pub fn new(organizations: Vec<Organization>) -> Self {
        Self { organizations }
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn len(&self) -> usize {
        self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == id)
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_all(&self) -> Result<Vec<Organization>, FetchError> {
        Ok(self.organizations.clone())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Organization>, FetchError> {
        Ok(self.get(id).cloned())
    }
}

/// Outcome of the remote half of a catalog load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RemoteStatus {
    /// No remote source configured.
    Disabled,
    /// The remote set was fetched and merged.
    Loaded { count: usize },
    /// The remote fetch failed; the catalog holds the static set only.
    Degraded { reason: String },
}

/// One request's snapshot of the organization catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub organizations: Vec<Organization>,
    pub static_count: usize,
    pub remote: RemoteStatus,
}

impl Catalog {
    pub fn is_degraded(&self) -> bool {
        matches!(self.remote, RemoteStatus::Degraded { .. })
    }
}

/// Build a catalog snapshot: the static set followed by the remote set.
///
/// Makes at most one remote call. Never fails; see the module docs for
/// the degradation policy.
pub async fn load_catalog(
    static_catalog: &StaticCatalog,
    remote: Option<&dyn CatalogSource>,
) -> Catalog {
    let mut organizations = static_catalog.organizations().to_vec();
    let static_count = organizations.len();

    let remote = match remote {
        None => RemoteStatus::Disabled,
        Some(source) => match source.fetch_all().await {
            Ok(remote_orgs) => {
                let count = remote_orgs.len();
                tracing::debug!(source = source.name(), count, "merged remote organizations");
                organizations.extend(remote_orgs);
                RemoteStatus::Loaded { count }
            }
            Err(e) => {
                tracing::warn!(
                    source = source.name(),
                    error = %e,
                    "remote catalog unavailable, using static organizations only"
                );
                RemoteStatus::Degraded {
                    reason: e.to_string(),
                }
            }
        },
    };

    Catalog {
        organizations,
        static_count,
        remote,
    }
}

/// Look up one organization: the static set first, then a single remote
/// lookup. A remote failure is logged and treated as "not found".
pub async fn find_organization(
    static_catalog: &StaticCatalog,
    remote: Option<&dyn CatalogSource>,
    id: &str,
) -> Option<Organization> {
    if let Some(org) = static_catalog.get(id) {
        return Some(org.clone());
    }

    let source = remote?;
    match source.fetch_by_id(id).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(
                source = source.name(),
                id,
                error = %e,
                "remote organization lookup failed"
            );
            None
        }
    }
}

/// Decode raw rows from a remote source, skipping rows that do not
/// deserialize or that violate [`Organization::validate`].
///
/// One malformed row does not take down the whole remote set.
pub fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Organization> {
    let total = rows.len();
    let organizations: Vec<Organization> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let org: Organization = match serde_json::from_value(row) {
                Ok(org) => org,
                Err(e) => {
                    tracing::warn!(row = i, error = %e, "skipping undecodable organization row");
                    return None;
                }
            };
            match org.validate() {
                Ok(()) => Some(org),
                Err(e) => {
                    tracing::warn!(row = i, error = %e, "skipping invalid organization row");
                    None
                }
            }
        })
        .collect();

    if organizations.len() < total {
        tracing::info!(
            kept = organizations.len(),
            skipped = total - organizations.len(),
            "decoded remote organization rows"
        );
    }
    organizations
}
