//! The contact record and its input form.
//!
//! [`ContactInput`] is what clients send. It becomes [`ContactFields`] only
//! after [`ContactInput::validate`] has trimmed and checked it, so stores
//! never see unvalidated data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, FieldError, Result};

/// Store-assigned contact identity. Always positive.
pub type ContactId = i64;

const MAX_FIELD_LEN: usize = 255;
const MAX_ADDRESS_LEN: usize = 1000;

// ─── Persisted record ────────────────────────────────────────────────────────

/// A persisted contact, serialised as the API's output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:         ContactId,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub address:    Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Request body for create and update.
///
/// Missing string fields deserialise as empty so they surface as validation
/// errors instead of body-parsing failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
  #[serde(default)]
  pub name:    String,
  #[serde(default)]
  pub email:   String,
  #[serde(default)]
  pub phone:   String,
  #[serde(default)]
  pub address: Option<String>,
}

/// Validated, normalised contact fields ready to be written by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
  pub name:    String,
  pub email:   String,
  pub phone:   String,
  pub address: Option<String>,
}

impl ContactInput {
  /// Trim and check every field, collecting all failures at once.
  pub fn validate(self) -> Result<ContactFields> {
    let name = self.name.trim().to_owned();
    let email = self.email.trim().to_owned();
    let phone = self.phone.trim().to_owned();
    let address = self
      .address
      .map(|a| a.trim().to_owned())
      .filter(|a| !a.is_empty());

    let mut errors = Vec::new();

    if name.is_empty() {
      errors.push(FieldError::new("name", "name is required"));
    } else if name.chars().count() > MAX_FIELD_LEN {
      errors.push(FieldError::new("name", too_long(MAX_FIELD_LEN)));
    }

    if email.is_empty() {
      errors.push(FieldError::new("email", "email is required"));
    } else if email.chars().count() > MAX_FIELD_LEN {
      errors.push(FieldError::new("email", too_long(MAX_FIELD_LEN)));
    } else if !is_well_formed_email(&email) {
      errors.push(FieldError::new("email", "email should be valid"));
    }

    if phone.chars().count() > MAX_FIELD_LEN {
      errors.push(FieldError::new("phone", too_long(MAX_FIELD_LEN)));
    }

    if address
      .as_ref()
      .is_some_and(|a| a.chars().count() > MAX_ADDRESS_LEN)
    {
      errors.push(FieldError::new("address", too_long(MAX_ADDRESS_LEN)));
    }

    if !errors.is_empty() {
      return Err(Error::Validation(errors));
    }

    Ok(ContactFields { name, email, phone, address })
  }
}

fn too_long(max: usize) -> String { format!("must be at most {max} characters") }

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain that is neither its first nor last character.
pub fn is_well_formed_email(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  match domain.find('.') {
    Some(_) => !domain.starts_with('.') && !domain.ends_with('.'),
    None => false,
  }
}
