//! Error type for `contacts-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Domain-level rejection (duplicate email, missing id).
  #[error(transparent)]
  Core(#[from] contacts_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl From<Error> for contacts_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(core) => core,
      other => contacts_core::Error::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
