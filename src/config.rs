//! TOML configuration parsing and validation.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:7340"
//!
//! [catalog]
//! static_path = "data/organizations.json"   # optional
//!
//! [remote]                                  # optional; omit to disable
//! url = "https://project.supabase.co"
//! table = "organizations"
//! api_key = "..."                           # or PARTNER_MATCH_REMOTE_API_KEY
//! timeout_secs = 5
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable consulted when `[remote].api_key` is not set.
pub const REMOTE_API_KEY_ENV: &str = "PARTNER_MATCH_REMOTE_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON file replacing the built-in organization set.
    #[serde(default)]
    pub static_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    /// Base URL of the REST service (PostgREST-style, e.g. a Supabase project).
    pub url: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "organizations".to_string()
}
fn default_timeout_secs() -> u64 {
    5
}

impl RemoteConfig {
    /// The configured key, falling back to [`REMOTE_API_KEY_ENV`].
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(REMOTE_API_KEY_ENV).ok())
            .filter(|k| !k.is_empty())
    }
}

impl Config {
    /// Built-in organizations only, no remote source.
    pub fn minimal() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:7340".to_string(),
            },
            catalog: CatalogConfig::default(),
            remote: None,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if let Some(ref remote) = config.remote {
        if !(remote.url.starts_with("http://") || remote.url.starts_with("https://")) {
            anyhow::bail!(
                "remote.url must start with http:// or https:// (got '{}')",
                remote.url
            );
        }
        if remote.table.trim().is_empty() {
            anyhow::bail!("remote.table must not be empty");
        }
        if !(1..=60).contains(&remote.timeout_secs) {
            anyhow::bail!("remote.timeout_secs must be in [1, 60]");
        }
    }

    Ok(config)
}
