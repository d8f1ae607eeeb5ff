//! HTTP server exposing organization search.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/search` | Filtered, scored, ranked organizations |
//! | `GET`  | `/api/organizations/{id}` | One organization, baseline-scored |
//! | `GET`  | `/api/focus-areas` | Focus-area taxonomy |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! `/api/search` accepts `query`, `focusArea`, `region`, `fundingType`,
//! `verificationStatus`, `sortBy`, and `explain`, all optional. It never
//! rejects parameters: anything malformed imposes no constraint.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "organization not found: org-123" } }
//! ```
//!
//! Error codes: `not_found` (404), `internal` (500). A failed request
//! returns no partial results.
//!
//! # Statelessness
//!
//! Every request builds its own catalog snapshot. The only state shared
//! between requests is the read-only static set and the HTTP client used
//! for the remote source.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use partner_match_core::models::{SearchQuery, SearchResponse, SearchResult};
use partner_match_core::score::HeuristicScorer;
use partner_match_core::taxonomy::{self, FocusAreaCategory};

use crate::catalog::CatalogSources;
use crate::config::Config;
use crate::get::get_organization;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    sources: Arc<CatalogSources>,
}

impl AppState {
    pub fn new(sources: CatalogSources) -> Self {
        Self {
            sources: Arc::new(sources),
        }
    }
}

/// Build the router. Split out from [`run_server`] so callers can mount
/// it on their own listener.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", get(handle_search))
        .route("/api/organizations/{id}", get(handle_get_organization))
        .route("/api/focus-areas", get(handle_focus_areas))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server on `[server].bind` and runs until the process
/// is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let sources = CatalogSources::from_config(config)?;
    tracing::info!(
        static_organizations = sources.static_catalog.len(),
        remote = sources.remote.as_ref().map(|r| r.endpoint()).unwrap_or("disabled"),
        "catalog sources ready"
    );

    let app = router(AppState::new(sources));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("listening on http://{}", config.server.bind);
    println!("Server listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/search ============

/// Handler for `GET /api/search`.
///
/// Scoring runs on the blocking pool; if it panics the request fails
/// with `500 internal` and nothing is returned.
async fn handle_search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let raw = match query {
        Ok(Query(q)) => q,
        Err(e) => {
            tracing::debug!(error = %e, "unreadable search parameters, searching unfiltered");
            SearchQuery::default()
        }
    };
    let params = raw.into_params();

    let catalog = state.sources.snapshot().await;
    let degraded = catalog.is_degraded();

    let response = tokio::task::spawn_blocking(move || {
        partner_match_core::search::search(&catalog.organizations, &params, &HeuristicScorer)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "search failed");
        internal("Failed to search organizations")
    })?;

    tracing::info!(total = response.total, degraded, "search served");
    Ok(Json(response))
}

// ============ GET /api/organizations/{id} ============

async fn handle_get_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SearchResult>, AppError> {
    get_organization(&state.sources, &id)
        .await
        .map(Json)
        .ok_or_else(|| not_found(format!("organization not found: {}", id)))
}

// ============ GET /api/focus-areas ============

#[derive(Serialize)]
struct FocusAreasResponse {
    categories: &'static [FocusAreaCategory],
}

async fn handle_focus_areas() -> Json<FocusAreasResponse> {
    Json(FocusAreasResponse {
        categories: taxonomy::categories(),
    })
}
