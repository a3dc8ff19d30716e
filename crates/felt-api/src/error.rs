//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use felt_core::analysis::AnalysisError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The analysis collaborator has no credential configured.
  #[error("analysis service not configured")]
  AnalysisUnavailable,

  /// The analysis provider call failed; persisted state is unchanged.
  #[error("analysis failed: {0}")]
  Analysis(String),
}

impl From<AnalysisError> for ApiError {
  fn from(e: AnalysisError) -> Self {
    match e {
      AnalysisError::NotConfigured => ApiError::AnalysisUnavailable,
      AnalysisError::Upstream(message) => ApiError::Analysis(message),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::AnalysisUnavailable => {
        (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
      }
      ApiError::Analysis(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
