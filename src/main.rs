//! Figure Survey · chart-reading survey server
//!
//! - Axum HTTP: landing page, per-participant survey flow, stats report
//! - Responses in SQLite (default) or PostgreSQL (DATABASE_URL)
//! - Session progress in a signed cookie
//!
//! Important env variables:
//!   PORT               : u16 (default 8080)
//!   SECRET_KEY         : session signing secret
//!   DATABASE_URL       : PostgreSQL connection string (SQLite otherwise)
//!   SQLITE_PATH        : default "responses.db"
//!   FIGURES_DIR        : default "figures"
//!   SURVEY_CONFIG_PATH : TOML question catalog (built-in catalog otherwise)
//!   SURVEY_SHUFFLE     : "true"/"false", per-participant figure order
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod catalog;
mod config;
mod domain;
mod error;
mod figures;
mod protocol;
mod routes;
mod seeds;
mod session;
mod state;
mod stats;
mod storage;
mod survey;
mod telemetry;
mod util;
mod views;

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Settings;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // .env is optional; real environment variables win.
  dotenv::dotenv().ok();
  telemetry::init_tracing();

  let settings = Settings::from_env();

  // Catalog, storage backend (schema created if missing), cookie key.
  let state = AppState::from_settings(&settings).await?;

  let app = build_router(state);

  let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "figure_survey", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "figure_survey", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "figure_survey", error = %e, "Failed to listen for shutdown signal");
  }
}
