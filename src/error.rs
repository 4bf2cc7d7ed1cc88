//! Request-level error type and its HTTP mapping.
//!
//! Only missing create-fields are defended with a 400; filter parse errors
//! and storage failures surface as 500s with a structured `{"error": ...}`
//! body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("Name or Description must be provided")]
  MissingFields,

  #[error("Invalid filter parameter {name}: {reason}")]
  InvalidFilter { name: &'static str, reason: String },

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      ApiError::MissingFields => StatusCode::BAD_REQUEST,
      ApiError::InvalidFilter { .. } | ApiError::Database(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
