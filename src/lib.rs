//! # Partner Match
//!
//! **Partnership discovery for NGOs, incubators, and CSR teams.**
//!
//! Partner Match searches a catalog of organizations and ranks them by an
//! alignment score: a fixed-weight heuristic that rewards matching focus
//! area, region, and funding type, then discounts by the record's
//! confidence. The engine lives in [`partner_match_core`]; this crate
//! adds configuration, the remote catalog client, a CLI, and an HTTP
//! server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ Static set   │   │ Remote table │  (REST, optional)
//! │ (built-in)   │   │ RestCatalog  │
//! └──────┬───────┘   └──────┬───────┘
//!        └────────┬─────────┘
//!                 ▼
//!         ┌──────────────┐
//!         │ load_catalog │  degrades to static on failure
//!         └──────┬───────┘
//!                ▼
//!      filter ─▶ score ─▶ rank
//!                │
//!       ┌────────┴────────┐
//!       ▼                 ▼
//!  ┌──────────┐     ┌──────────┐
//!  │   CLI    │     │   HTTP   │
//!  │ (pmatch) │     │  (axum)  │
//!  └──────────┘     └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! pmatch search education --region northern --sort-by alignment
//! pmatch get org-001
//! pmatch sources
//! pmatch serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`catalog`] | Built-in organization set and source wiring |
//! | [`remote`] | REST catalog client (`CatalogSource` over HTTP) |
//! | [`search`] | Search entry point and CLI output |
//! | [`get`] | Single-organization lookup |
//! | [`export`] | JSON export for static clients |
//! | [`sources`] | Catalog source status |
//! | [`server`] | HTTP server (Axum) with CORS |

pub mod catalog;
pub mod config;
pub mod export;
pub mod get;
pub mod remote;
pub mod search;
pub mod server;
pub mod sources;

pub use partner_match_core::catalog::{CatalogSource, FetchError, StaticCatalog};
pub use partner_match_core::models::{
    Organization, OrganizationType, SearchParams, SearchQuery, SearchResponse, SearchResult,
    SortBy, VerificationFilter, VerificationStatus,
};
