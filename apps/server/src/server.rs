//! HTTP surface.
//!
//! `/api/*` serves dropdown options and recomputed views, `/health/*` the
//! probes, and everything else falls through to the built web renderer.
//! The server keeps no per-session state: each browser sends its filter with
//! every request.

use crate::dataset::Dataset;
use crate::domain::{FilterState, ALL_COUNTRIES};
use crate::search::search_options;
use crate::views::recompute;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse<'a> {
    pub default: &'static str,
    pub options: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewsQuery {
    pub country: Option<String>,
}

/// Assemble the router. Static assets are served from `web_dist`.
pub fn app(dataset: Arc<Dataset>, web_dist: &Path) -> Router {
    let state = AppState { dataset };

    let api = Router::new()
        .route("/api/options", get(options))
        .route("/api/options/search", get(search))
        .route("/api/views", get(views))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .fallback_service(ServeDir::new(web_dist))
        .layer(TraceLayer::new_for_http())
}

async fn options(State(state): State<AppState>) -> Response {
    Json(OptionsResponse {
        default: ALL_COUNTRIES,
        options: state.dataset.filter_options(),
    })
    .into_response()
}

async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Response {
    let options = state.dataset.filter_options();
    let matches = search_options(&options, &query.q);
    tracing::debug!(query = %query.q, matches = matches.len(), "searched filter options");

    Json(OptionsResponse {
        default: ALL_COUNTRIES,
        options: matches,
    })
    .into_response()
}

async fn views(State(state): State<AppState>, Query(query): Query<ViewsQuery>) -> Response {
    let filter = FilterState::parse(query.country.as_deref());
    let views = recompute(&state.dataset, &filter);
    tracing::debug!(
        %filter,
        bars = views.bar.bars.len(),
        rows = views.table.rows.len(),
        "recomputed dashboard views"
    );

    Json(views).into_response()
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness() -> &'static str {
    "ready"
}
