//! # Partner Match Core
//!
//! The organization matching and ranking engine behind Partner Match:
//! data model, filter stage, alignment scorer, ranking stage, catalog
//! abstraction, and the focus-area taxonomy.
//!
//! This crate contains no tokio, HTTP client, or filesystem I/O. The
//! application crate supplies catalog sources (for example a remote REST
//! table) through the [`catalog::CatalogSource`] trait.
//!
//! # Pipeline
//!
//! ```text
//! static set ─┐
//!             ├─▶ load_catalog ─▶ filter ─▶ score ─▶ rank ─▶ SearchResponse
//! remote set ─┘   (degrades to static on FetchError)
//! ```

pub mod catalog;
pub mod filter;
pub mod models;
pub mod rank;
pub mod score;
pub mod search;
pub mod taxonomy;
