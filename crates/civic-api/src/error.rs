//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The event stream could not take the change; nothing was applied.
  #[error("service unavailable: {0}")]
  Unavailable(String),
}

impl From<civic_core::Error> for ApiError {
  fn from(e: civic_core::Error) -> Self {
    match e {
      civic_core::Error::Publish { .. } => ApiError::Unavailable(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
