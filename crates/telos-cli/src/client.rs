//! Async HTTP client wrapping the telos JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use std::time::Duration;
use telos_core::{
  category::Category,
  goal::Goal,
  journal::Retrospective,
  record::{MonthlyRecord, NewRecord},
};
use uuid::Uuid;

/// Connection settings for the telos API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the telos JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  // ── Categories ────────────────────────────────────────────────────────────

  /// `GET /api/categories`
  pub async fn list_categories(&self) -> Result<Vec<Category>> {
    let resp = self
      .auth(self.client.get(self.url("/categories")))
      .send()
      .await
      .context("GET /categories failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /categories → {}", resp.status()));
    }
    resp.json().await.context("deserialising categories")
  }

  // ── Goals ─────────────────────────────────────────────────────────────────

  /// `GET /api/goals?year=<year>`
  pub async fn list_goals(&self, year: i32) -> Result<Vec<Goal>> {
    let resp = self
      .auth(self.client.get(self.url("/goals")))
      .query(&[("year", year.to_string())])
      .send()
      .await
      .context("GET /goals failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /goals → {}", resp.status()));
    }
    resp.json().await.context("deserialising goals")
  }

  // ── Records ───────────────────────────────────────────────────────────────

  /// `GET /api/records?year=<year>`
  pub async fn year_records(&self, year: i32) -> Result<Vec<MonthlyRecord>> {
    let resp = self
      .auth(self.client.get(self.url("/records")))
      .query(&[("year", year.to_string())])
      .send()
      .await
      .context("GET /records failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /records → {}", resp.status()));
    }
    resp.json().await.context("deserialising records")
  }

  /// `GET /api/records?year=<year>&month=<month>`
  pub async fn month_records(&self, year: i32, month: u32) -> Result<Vec<MonthlyRecord>> {
    let resp = self
      .auth(self.client.get(self.url("/records")))
      .query(&[
        ("year", year.to_string()),
        ("month", month.to_string()),
      ])
      .send()
      .await
      .context("GET /records failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /records → {}", resp.status()));
    }
    resp.json().await.context("deserialising records")
  }

  /// `PUT /api/records` — natural-key upsert of one cell.
  pub async fn put_record(&self, input: &NewRecord) -> Result<MonthlyRecord> {
    tracing::debug!(goal = %input.goal_id, month = input.month, "writing record");
    let body = serde_json::json!({
      "goal_id":       input.goal_id,
      "year":          input.year,
      "month":         input.month,
      "numeric_value": input.numeric_value,
      "status":        input.status,
      "achieved":      input.achieved,
    });

    let resp = self
      .auth(self.client.put(self.url("/records")))
      .json(&body)
      .send()
      .await
      .context("PUT /records failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("PUT /records → {}", resp.status()));
    }
    resp.json().await.context("deserialising record")
  }

  /// Clear one cell — the "record again" control.
  pub async fn clear_record(&self, goal_id: Uuid, year: i32, month: u32) -> Result<MonthlyRecord> {
    self.put_record(&NewRecord::clear(goal_id, year, month)).await
  }

  // ── Journal ───────────────────────────────────────────────────────────────

  /// `GET /api/retrospectives?year=<year>&month=<month>`
  pub async fn get_retrospective(
    &self,
    year:  i32,
    month: u32,
  ) -> Result<Option<Retrospective>> {
    let resp = self
      .auth(self.client.get(self.url("/retrospectives")))
      .query(&[
        ("year", year.to_string()),
        ("month", month.to_string()),
      ])
      .send()
      .await
      .context("GET /retrospectives failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /retrospectives → {}", resp.status()));
    }
    resp.json().await.context("deserialising retrospective")
  }
}
