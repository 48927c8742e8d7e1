//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::{AsErrorKind, ErrorKind};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0} does not exist")]
  NotFound(String),

  #[error("invalid request body: {0}")]
  InvalidBody(String),

  #[error("{source}")]
  Store {
    kind:   ErrorKind,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Wrap a backend error, keeping its classification.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + AsErrorKind + Send + Sync + 'static,
  {
    ApiError::Store {
      kind:   err.error_kind(),
      source: Box::new(err),
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      ApiError::NotFound(_) => ErrorKind::NotFound,
      ApiError::InvalidBody(_) => ErrorKind::InvalidInput,
      ApiError::Store { kind, .. } => *kind,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::InvalidBody(rejection.body_text())
  }
}

/// The HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
  match kind {
    ErrorKind::NotFound => StatusCode::NOT_FOUND,
    ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
    ErrorKind::AlreadyRetired
    | ErrorKind::DuplicateAssignment
    | ErrorKind::OverlapConflict
    | ErrorKind::NameConflict => StatusCode::CONFLICT,
    ErrorKind::ConcurrencyConflict => StatusCode::SERVICE_UNAVAILABLE,
    ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let kind = self.kind();
    let status = status_for(kind);
    if status.is_server_error() {
      tracing::error!(error_kind = %kind, error = %self, "request failed");
    }
    let body = json!({ "error_kind": kind, "message": self.to_string() });
    (status, Json(body)).into_response()
  }
}
