//! Handler for `GET /contacts/search?q=<term>`.
//!
//! The term is matched case-insensitively against name, email and phone.
//! A blank `q` returns every contact; a missing `q` is a 400.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use contacts_core::{contact::Contact, service::ContactService, store::ContactStore};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub q: String,
}

/// `GET /contacts/search?q=<term>`
pub async fn handler<S>(
  State(service): State<ContactService<S>>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
  contacts_core::Error: From<S::Error>,
{
  let Query(params) = params?;
  Ok(Json(service.search(&params.q).await?))
}
