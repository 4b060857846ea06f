//! Async HTTP client wrapping the contacts JSON API.

use anyhow::{Context, Result, anyhow};
use contacts_core::contact::{Contact, ContactId, ContactInput};
use reqwest::{Client, Response};
use std::time::Duration;

/// Async HTTP client for the contacts JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api/contacts{}",
      self.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `GET /api/contacts`
  pub async fn list(&self) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url(""))
      .send()
      .await
      .context("GET /contacts failed")?;
    check(resp, "GET /contacts")
      .await?
      .json()
      .await
      .context("deserialising contacts")
  }

  /// `GET /api/contacts/{id}`
  pub async fn get(&self, id: ContactId) -> Result<Contact> {
    let resp = self
      .client
      .get(self.url(&format!("/{id}")))
      .send()
      .await
      .with_context(|| format!("GET /contacts/{id} failed"))?;
    check(resp, "GET /contacts/{id}")
      .await?
      .json()
      .await
      .context("deserialising contact")
  }

  /// `POST /api/contacts`
  pub async fn create(&self, input: &ContactInput) -> Result<Contact> {
    let resp = self
      .client
      .post(self.url(""))
      .json(input)
      .send()
      .await
      .context("POST /contacts failed")?;
    check(resp, "POST /contacts")
      .await?
      .json()
      .await
      .context("deserialising created contact")
  }

  /// `PUT /api/contacts/{id}`
  pub async fn update(&self, id: ContactId, input: &ContactInput) -> Result<Contact> {
    let resp = self
      .client
      .put(self.url(&format!("/{id}")))
      .json(input)
      .send()
      .await
      .with_context(|| format!("PUT /contacts/{id} failed"))?;
    check(resp, "PUT /contacts/{id}")
      .await?
      .json()
      .await
      .context("deserialising updated contact")
  }

  /// `DELETE /api/contacts/{id}`
  pub async fn delete(&self, id: ContactId) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/{id}")))
      .send()
      .await
      .with_context(|| format!("DELETE /contacts/{id} failed"))?;
    check(resp, "DELETE /contacts/{id}").await?;
    Ok(())
  }

  /// `GET /api/contacts/search?q=<term>`
  pub async fn search(&self, term: &str) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/search"))
      .query(&[("q", term)])
      .send()
      .await
      .context("GET /contacts/search failed")?;
    check(resp, "GET /contacts/search")
      .await?
      .json()
      .await
      .context("deserialising search results")
  }
}

/// Turn a non-success response into an error carrying the server's message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  tracing::debug!(%status, "{what}");
  if status.is_success() {
    return Ok(resp);
  }
  let body: serde_json::Value = resp.json().await.unwrap_or_default();
  Err(anyhow!("{what} → {status}: {}", describe_error(&body)))
}

/// Render an API error body, including per-field validation messages.
pub fn describe_error(body: &serde_json::Value) -> String {
  let mut msg = body
    .get("error")
    .and_then(|e| e.as_str())
    .unwrap_or("no error message")
    .to_owned();
  if let Some(fields) = body.get("fields").and_then(|f| f.as_object()) {
    for (field, reason) in fields {
      msg.push_str(&format!("\n  {field}: {}", reason.as_str().unwrap_or_default()));
    }
  }
  msg
}
