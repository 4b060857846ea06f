//! The `ContactStore` trait.
//!
//! Implemented by storage backends (e.g. `contacts-store-sqlite`). The
//! service and the HTTP layer depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::contact::{Contact, ContactFields, ContactId};

/// Abstraction over a contact store backend.
///
/// Backends own the authoritative email-uniqueness guarantee: `save` must
/// reject a write that would give two contacts the same email, even when
/// the caller skipped its own check. Such rejections convert into
/// [`crate::Error::DuplicateEmail`]; a `save` against a missing id converts
/// into [`crate::Error::NotFound`].
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a contact by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Retrieve the contact owning `email`, compared exactly.
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// All contacts, ordered by id.
  fn find_all(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  fn exists_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Case-insensitive substring match over name, email and phone.
  /// Result order is unspecified.
  fn search<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert when `id` is `None`, otherwise overwrite the fields of the
  /// existing record in place.
  ///
  /// Inserts assign the id and both timestamps. Updates keep the id and
  /// `created_at` and refresh `updated_at`.
  fn save(
    &self,
    id: Option<ContactId>,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Remove a contact permanently. Returns whether a row was removed.
  fn delete_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
