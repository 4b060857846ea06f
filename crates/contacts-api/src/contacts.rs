//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | All contacts, ordered by id |
//! | `POST`   | `/contacts` | Body: [`ContactInput`]; 201 on success |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `PUT`    | `/contacts/{id}` | Body: [`ContactInput`]; overwrites every field |
//! | `DELETE` | `/contacts/{id}` | 204 on success, 404 if not found |

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use contacts_core::{
  contact::{Contact, ContactId, ContactInput},
  service::ContactService,
  store::ContactStore,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(service): State<ContactService<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
  contacts_core::Error: From<S::Error>,
{
  Ok(Json(service.get_all().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`
pub async fn create<S>(
  State(service): State<ContactService<S>>,
  body: Result<Json<ContactInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
  contacts_core::Error: From<S::Error>,
{
  let Json(input) = body?;
  let contact = service.create(input).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  State(service): State<ContactService<S>>,
  id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
  contacts_core::Error: From<S::Error>,
{
  let Path(id) = id?;
  Ok(Json(service.get_by_id(id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}`
pub async fn update<S>(
  State(service): State<ContactService<S>>,
  id: Result<Path<ContactId>, PathRejection>,
  body: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
  contacts_core::Error: From<S::Error>,
{
  let Path(id) = id?;
  let Json(input) = body?;
  Ok(Json(service.update(id, input).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`
pub async fn delete_one<S>(
  State(service): State<ContactService<S>>,
  id: Result<Path<ContactId>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
  contacts_core::Error: From<S::Error>,
{
  let Path(id) = id?;
  service.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
