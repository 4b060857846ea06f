//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use contacts_core::FieldError;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("validation failed")]
  Validation(Vec<FieldError>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<contacts_core::Error> for ApiError {
  fn from(err: contacts_core::Error) -> Self {
    use contacts_core::Error as E;
    match err {
      E::Validation(fields) => ApiError::Validation(fields),
      e @ E::DuplicateEmail(_) => ApiError::BadRequest(e.to_string()),
      e @ E::NotFound(_) => ApiError::NotFound(e.to_string()),
      E::Store(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rej: JsonRejection) -> Self { ApiError::BadRequest(rej.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rej: PathRejection) -> Self { ApiError::BadRequest(rej.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rej: QueryRejection) -> Self { ApiError::BadRequest(rej.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Validation(fields) => {
        let fields: Map<String, Value> = fields
          .iter()
          .map(|f| (f.field.to_owned(), Value::String(f.message.clone())))
          .collect();
        (
          StatusCode::BAD_REQUEST,
          json!({ "error": self.to_string(), "fields": fields }),
        )
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
      }
    };
    (status, Json(body)).into_response()
  }
}
