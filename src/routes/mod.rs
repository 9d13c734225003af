//! Router assembly: survey pages, stats, figure files, JSON probes, and HTTP tracing.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - survey flow: `/`, `/start`, `/survey`, `/complete`
/// - reports: `/stats` (HTML) and `/api/v1/stats` (JSON)
/// - figure images under `/figures/` (ServeDir refuses `..` traversal)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: AppState) -> Router {
    let figures_service = ServeDir::new(state.figures.dir());

    Router::new()
        .route("/", get(http::http_home))
        .route("/start", post(http::http_start))
        .route("/survey", get(http::http_get_survey).post(http::http_post_survey))
        .route("/complete", get(http::http_complete))
        .route("/stats", get(http::http_stats))
        .route("/api/v1/stats", get(http::http_stats_json))
        .route("/api/v1/health", get(http::http_health))
        .nest_service("/figures", figures_service)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
