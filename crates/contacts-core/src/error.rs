//! Error types for `contacts-core`.

use serde::Serialize;
use thiserror::Error;

use crate::contact::ContactId;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

impl FieldError {
  pub fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {}", join_fields(.0))]
  Validation(Vec<FieldError>),

  #[error("email already exists: {0}")]
  DuplicateEmail(String),

  #[error("contact not found with id: {0}")]
  NotFound(ContactId),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn join_fields(fields: &[FieldError]) -> String {
  fields
    .iter()
    .map(|f| format!("{}: {}", f.field, f.message))
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
