//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as the same envelope:
//! `{"success": false, "error": <status>, "message": "<text>"}`. The detail
//! carried by the variant is logged, never returned to the client.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("method not allowed")]
  MethodNotAllowed,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// The fixed, client-facing message for this error class.
  pub fn message(&self) -> &'static str {
    match self {
      ApiError::NotFound(_) => "resource not found",
      ApiError::Unprocessable(_) => "unprocessable",
      ApiError::MethodNotAllowed => "Method not allowed",
      ApiError::Store(_) => "Internal Server Error",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::debug!(error = %self, "request rejected");
    }

    let body = json!({
      "success": false,
      "error":   status.as_u16(),
      "message": self.message(),
    });
    (status, Json(body)).into_response()
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::Unprocessable(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::NotFound(rejection.body_text())
  }
}
