//! [`ContactService`] — business rules over a [`ContactStore`].
//!
//! The service validates input, checks existence, and pre-checks email
//! uniqueness so callers get a precise error. The store's own uniqueness
//! guarantee remains authoritative for concurrent writers.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
  Error, Result,
  contact::{Contact, ContactId, ContactInput},
  store::ContactStore,
};

pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S> ContactService<S>
where
  S: ContactStore,
  Error: From<S::Error>,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate and persist a new contact.
  pub async fn create(&self, input: ContactInput) -> Result<Contact> {
    let fields = input.validate()?;

    if self.store.find_by_email(&fields.email).await?.is_some() {
      debug!(email = %fields.email, "rejecting create: email taken");
      return Err(Error::DuplicateEmail(fields.email));
    }

    let contact = self.store.save(None, fields).await?;
    info!(id = contact.id, email = %contact.email, "created contact");
    Ok(contact)
  }

  pub async fn get_all(&self) -> Result<Vec<Contact>> {
    Ok(self.store.find_all().await?)
  }

  pub async fn get_by_id(&self, id: ContactId) -> Result<Contact> {
    self.store.find_by_id(id).await?.ok_or(Error::NotFound(id))
  }

  /// Overwrite every field of an existing contact.
  ///
  /// Keeping the current email never trips the uniqueness check.
  pub async fn update(&self, id: ContactId, input: ContactInput) -> Result<Contact> {
    let fields = input.validate()?;

    let current = self
      .store
      .find_by_id(id)
      .await?
      .ok_or(Error::NotFound(id))?;

    if current.email != fields.email
      && self.store.find_by_email(&fields.email).await?.is_some()
    {
      debug!(id, email = %fields.email, "rejecting update: email taken");
      return Err(Error::DuplicateEmail(fields.email));
    }

    let contact = self.store.save(Some(id), fields).await?;
    info!(id, email = %contact.email, "updated contact");
    Ok(contact)
  }

  pub async fn delete(&self, id: ContactId) -> Result<()> {
    if !self.store.exists_by_id(id).await? {
      return Err(Error::NotFound(id));
    }
    // A concurrent delete between the check and here still means "gone".
    if !self.store.delete_by_id(id).await? {
      return Err(Error::NotFound(id));
    }
    info!(id, "deleted contact");
    Ok(())
  }

  /// A blank term matches every contact.
  pub async fn search(&self, term: &str) -> Result<Vec<Contact>> {
    let term = term.trim();
    if term.is_empty() {
      return self.get_all().await;
    }
    let found = self.store.search(term).await?;
    debug!(term, hits = found.len(), "searched contacts");
    Ok(found)
  }
}
