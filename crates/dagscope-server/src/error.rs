//! API error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dagscope_worker::WorkerError;
use serde_json::json;
use thiserror::Error;

/// Errors a handler can answer with.
///
/// Every variant renders as `{"error": "..."}` so layout failures reach the
/// viewer in the same shape the worker protocol uses.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The layout engine rejected or failed on the submitted graph.
  #[error("layout failed: {message}")]
  LayoutFailed { message: String },

  /// The computation outran the server's timeout and was abandoned.
  #[error("layout computation timed out")]
  LayoutTimeout,

  /// The computation ended without a terminal event.
  #[error("layout computation cancelled")]
  LayoutCancelled,

  #[error(transparent)]
  Worker(#[from] WorkerError),
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      Self::LayoutFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      Self::LayoutTimeout => StatusCode::GATEWAY_TIMEOUT,
      Self::LayoutCancelled => StatusCode::INTERNAL_SERVER_ERROR,
      Self::Worker(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = Json(json!({ "error": self.to_string() }));
    (self.status(), body).into_response()
  }
}
