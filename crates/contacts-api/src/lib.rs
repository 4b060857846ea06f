//! JSON REST API for contacts.
//!
//! Exposes an axum [`Router`] backed by any [`contacts_core::store::ContactStore`].
//! TLS, CORS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", contacts_api::api_router(store.clone()))
//! ```

pub mod contacts;
pub mod error;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use contacts_core::{service::ContactService, store::ContactStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
  contacts_core::Error: From<S::Error>,
{
  Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route("/contacts/search", get(search::handler::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .with_state(ContactService::new(store))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use contacts_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  fn contact(name: &str, email: &str) -> Value {
    json!({ "name": name, "email": email, "phone": "555-0100", "address": "1 Main St" })
  }

  // ── Create ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_record() {
    let app = app().await;
    let (status, body) = send(&app, "POST", "/contacts", Some(contact("Ann", "ann@x.com"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "ann@x.com");
    assert_eq!(body["address"], "1 Main St");
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
  }

  #[tokio::test]
  async fn create_duplicate_email_returns_400() {
    let app = app().await;
    send(&app, "POST", "/contacts", Some(contact("Ann", "ann@x.com"))).await;
    let (status, body) = send(&app, "POST", "/contacts", Some(contact("Bob", "ann@x.com"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"), "{body}");
  }

  #[tokio::test]
  async fn create_missing_fields_returns_field_errors() {
    let app = app().await;
    let (status, body) = send(&app, "POST", "/contacts", Some(json!({ "phone": "1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["name"].is_string(), "{body}");
    assert!(body["fields"]["email"].is_string(), "{body}");

    let (_, list) = send(&app, "GET", "/contacts", None).await;
    assert_eq!(list, json!([]));
  }

  #[tokio::test]
  async fn malformed_json_returns_400() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/contacts")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Read ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_and_get_one() {
    let app = app().await;
    send(&app, "POST", "/contacts", Some(contact("Ann", "ann@x.com"))).await;
    send(&app, "POST", "/contacts", Some(contact("Bob", "bob@x.com"))).await;

    let (status, list) = send(&app, "GET", "/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, one) = send(&app, "GET", "/contacts/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["name"], "Bob");
  }

  #[tokio::test]
  async fn get_missing_returns_404() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/contacts/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains('9'));
  }

  #[tokio::test]
  async fn non_numeric_id_returns_400() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/contacts/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Update ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_changes_email_and_get_reflects_it() {
    let app = app().await;
    send(&app, "POST", "/contacts", Some(contact("Ann", "ann@x.com"))).await;

    let (status, body) = send(&app, "PUT", "/contacts/1", Some(contact("Ann", "bob@x.com"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "bob@x.com");

    let (_, fetched) = send(&app, "GET", "/contacts/1", None).await;
    assert_eq!(fetched["email"], "bob@x.com");
  }

  #[tokio::test]
  async fn update_missing_returns_404() {
    let app = app().await;
    let (status, _) = send(&app, "PUT", "/contacts/3", Some(contact("Ann", "ann@x.com"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn update_to_taken_email_returns_400() {
    let app = app().await;
    send(&app, "POST", "/contacts", Some(contact("Ann", "ann@x.com"))).await;
    send(&app, "POST", "/contacts", Some(contact("Bob", "bob@x.com"))).await;
    let (status, _) = send(&app, "PUT", "/contacts/1", Some(contact("Ann", "bob@x.com"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(&app, "GET", "/contacts/1", None).await;
    assert_eq!(fetched["email"], "ann@x.com");
  }

  // ── Delete ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_returns_204_then_404() {
    let app = app().await;
    send(&app, "POST", "/contacts", Some(contact("Ann", "ann@x.com"))).await;

    let (status, body) = send(&app, "DELETE", "/contacts/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", "/contacts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/contacts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Search ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_matches_name_or_email() {
    let app = app().await;
    send(&app, "POST", "/contacts", Some(contact("Alice", "a1@x.com"))).await;
    send(&app, "POST", "/contacts", Some(contact("Bob", "alice.b@x.com"))).await;
    send(&app, "POST", "/contacts", Some(contact("Carol", "carol@x.com"))).await;

    let (status, body) = send(&app, "GET", "/contacts/search?q=ALICE", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<_> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["name"].as_str().unwrap().to_owned())
      .collect();
    names.sort();
    assert_eq!(names, vec!["Alice", "Bob"]);
  }

  #[tokio::test]
  async fn blank_search_returns_all_and_missing_q_is_400() {
    let app = app().await;
    send(&app, "POST", "/contacts", Some(contact("Ann", "ann@x.com"))).await;

    let (status, body) = send(&app, "GET", "/contacts/search?q=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", "/contacts/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
