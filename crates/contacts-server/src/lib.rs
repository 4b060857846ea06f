//! HTTP server assembly for the contacts API.
//!
//! Wraps [`contacts_api::api_router`] with request tracing and CORS and
//! mounts it under `/api`.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::{HeaderValue, Method, header, header::InvalidHeaderValue},
};
use contacts_core::store::ContactStore;
use serde::Deserialize;
use tower_http::{
  cors::{AllowOrigin, CorsLayer},
  trace::TraceLayer,
};

/// Store path that selects an in-memory database.
pub const IN_MEMORY: &str = ":memory:";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered with
/// `CONTACTS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  #[serde(default = "default_store_path")]
  pub store_path:   PathBuf,
  /// Browser origins allowed to call the API.
  #[serde(default = "default_cors_origins")]
  pub cors_origins: Vec<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("contacts.db") }

fn default_cors_origins() -> Vec<String> {
  vec![
    "http://localhost:3000".to_string(),
    "http://localhost:5173".to_string(),
  ]
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         default_host(),
      port:         default_port(),
      store_path:   default_store_path(),
      cors_origins: default_cors_origins(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// CORS policy admitting `origins` for the methods the API serves.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
  let origins = origins
    .iter()
    .map(|o| HeaderValue::from_str(o))
    .collect::<Result<Vec<_>, _>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
      ])
      .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
  )
}

/// Build the full application router: API under `/api`, traced and
/// CORS-wrapped.
pub fn router<S>(store: Arc<S>, cors: CorsLayer) -> Router
where
  S: ContactStore + 'static,
  contacts_core::Error: From<S::Error>,
{
  Router::new()
    .nest("/api", contacts_api::api_router(store))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
