//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, functions::FunctionFlags};

use contacts_core::{
  contact::{Contact, ContactFields, ContactId},
  store::ContactStore,
};

use crate::{
  encode::{CONTACT_COLUMNS, RawContact, contains_pattern, encode_dt},
  schema::SCHEMA,
  Error, Result,
};

/// What happened inside a write transaction.
enum SaveOutcome {
  Saved(RawContact),
  DuplicateEmail,
  Missing(ContactId),
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

/// Unicode lowercase used on both sides of a search comparison.
fn fold(s: &str) -> String { s.to_lowercase() }

/// Register `fold(text)` on `conn` so SQL can compare with the same case
/// mapping as [`fold`].
fn register_fold(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "fold",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let text: Option<String> = ctx.get(0)?;
      Ok(text.as_deref().map(fold))
    },
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        register_fold(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert(&self, fields: ContactFields) -> Result<SaveOutcome> {
    let now = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let inserted = tx.execute(
          "INSERT INTO contacts (name, email, phone, address, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![fields.name, fields.email, fields.phone, fields.address, now],
        );
        match inserted {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => return Ok(SaveOutcome::DuplicateEmail),
          Err(e) => return Err(e.into()),
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(SaveOutcome::Saved(RawContact {
          id,
          name: fields.name,
          email: fields.email,
          phone: fields.phone,
          address: fields.address,
          created_at: now.clone(),
          updated_at: now,
        }))
      })
      .await?;
    Ok(outcome)
  }

  async fn update(&self, id: ContactId, fields: ContactFields) -> Result<SaveOutcome> {
    let now = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let created_at: Option<String> = tx
          .query_row(
            "SELECT created_at FROM contacts WHERE id = ?1",
            rusqlite::params![id],
            |r| r.get(0),
          )
          .optional()?;
        let Some(created_at) = created_at else {
          return Ok(SaveOutcome::Missing(id));
        };

        let updated = tx.execute(
          "UPDATE contacts
             SET name = ?2, email = ?3, phone = ?4, address = ?5, updated_at = ?6
           WHERE id = ?1",
          rusqlite::params![id, fields.name, fields.email, fields.phone, fields.address, now],
        );
        match updated {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => return Ok(SaveOutcome::DuplicateEmail),
          Err(e) => return Err(e.into()),
        }
        tx.commit()?;

        Ok(SaveOutcome::Saved(RawContact {
          id,
          name: fields.name,
          email: fields.email,
          phone: fields.phone,
          address: fields.address,
          created_at,
          updated_at: now,
        }))
      })
      .await?;
    Ok(outcome)
  }

  async fn query_many(
    &self,
    sql: String,
    pattern: Option<String>,
  ) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match pattern {
          Some(p) => stmt
            .query_map(rusqlite::params![p], RawContact::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawContact::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
            rusqlite::params![id],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
    let email = email.to_owned();

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE email = ?1"),
            rusqlite::params![email],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Contact>> {
    self
      .query_many(format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"), None)
      .await
  }

  async fn exists_by_id(&self, id: ContactId) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM contacts WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;
    Ok(exists)
  }

  async fn search(&self, term: &str) -> Result<Vec<Contact>> {
    // LIKE only folds ASCII, so both sides go through `fold` first.
    let sql = format!(
      r"SELECT {CONTACT_COLUMNS} FROM contacts
        WHERE fold(name)  LIKE ?1 ESCAPE '\'
           OR fold(email) LIKE ?1 ESCAPE '\'
           OR fold(phone) LIKE ?1 ESCAPE '\'
        ORDER BY id"
    );
    self.query_many(sql, Some(contains_pattern(&fold(term)))).await
  }

  async fn save(&self, id: Option<ContactId>, fields: ContactFields) -> Result<Contact> {
    let email = fields.email.clone();

    let outcome = match id {
      None => self.insert(fields).await?,
      Some(id) => self.update(id, fields).await?,
    };

    match outcome {
      SaveOutcome::Saved(raw) => raw.into_contact(),
      SaveOutcome::DuplicateEmail => Err(contacts_core::Error::DuplicateEmail(email).into()),
      SaveOutcome::Missing(id) => Err(contacts_core::Error::NotFound(id).into()),
    }
  }

  async fn delete_by_id(&self, id: ContactId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(n > 0)
      })
      .await?;
    Ok(removed)
  }
}
