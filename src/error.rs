//! Request-level failures, rendered as a generic error page.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::storage::StorageError;
use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Storage(#[from] StorageError),

  #[error("session encoding failed: {0}")]
  Session(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    error!(target: "figure_survey", error = %self, "Request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, views::error()).into_response()
  }
}
