//! JSON REST API for telos.
//!
//! Exposes an axum [`Router`] backed by any [`telos_core::store::PlannerStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", telos_api::api_router(store.clone(), owner))
//! ```

pub mod backup;
pub mod categories;
pub mod error;
pub mod feedback;
pub mod goals;
pub mod journal;
pub mod profile;
pub mod records;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use telos_core::store::PlannerStore;
use uuid::Uuid;

pub use error::ApiError;

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all API handlers: the store plus the
/// authenticated principal every request is scoped to.
pub struct ApiState<S> {
  pub store: Arc<S>,
  pub owner: Uuid,
}

// Manual impl: `S` itself need not be `Clone` behind the `Arc`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), owner: self.owner }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`, scoped to `owner`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, owner: Uuid) -> Router<()>
where
  S: PlannerStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Categories
    .route(
      "/categories",
      get(categories::list::<S>).post(categories::create::<S>),
    )
    .route("/categories/reorder", put(categories::reorder::<S>))
    .route("/categories/{id}", axum::routing::delete(categories::delete_one::<S>))
    // Goals
    .route("/goals", get(goals::list::<S>).post(goals::create::<S>))
    .route("/goals/reorder", put(goals::reorder::<S>))
    .route("/goals/{id}", axum::routing::delete(goals::delete_one::<S>))
    // Monthly records
    .route("/records", get(records::list::<S>).put(records::upsert::<S>))
    // Journal
    .route(
      "/retrospectives",
      get(journal::get_retrospective::<S>).put(journal::put_retrospective::<S>),
    )
    .route(
      "/resolutions",
      get(journal::get_resolution::<S>).put(journal::put_resolution::<S>),
    )
    // Backup
    .route("/backup", get(backup::export::<S>).post(backup::import::<S>))
    // Profile & feedback
    .route("/profile", get(profile::get_one::<S>).put(profile::update::<S>))
    .route("/feedback", post(feedback::submit::<S>))
    .with_state(ApiState { store, owner })
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use telos_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::api_router;
  use telos_core::store::PlannerStore as _;

  async fn make_router() -> (Router, SqliteStore, Uuid) {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let owner = store.get_or_create_user("haeun").await.unwrap().user_id;
    (api_router(Arc::new(store.clone()), owner), store, owner)
  }

  async fn send(
    router: &Router,
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
    let resp = router
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── Categories ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn listing_categories_seeds_the_defaults() {
    let (router, _, _) = make_router().await;

    let (status, listed) = send(&router, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 3);
    assert_eq!(listed[0]["name"], "건강");

    // Listing again does not reseed.
    let (_, again) = send(&router, "GET", "/categories", None).await;
    assert_eq!(again.as_array().unwrap().len(), 3);
  }

  #[tokio::test]
  async fn category_delete_is_blocked_while_goals_reference_it() {
    let (router, _, _) = make_router().await;

    let (status, cat) = send(
      &router,
      "POST",
      "/categories",
      Some(json!({"name": "건강", "color": "bg-red-100 text-red-700"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let cat_id = cat["category_id"].as_str().unwrap().to_owned();

    let (status, goal) = send(
      &router,
      "POST",
      "/goals",
      Some(json!({
        "category_id": cat_id,
        "year": 2026,
        "title": "달리기",
        "kind": "BOOLEAN",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let goal_id = goal["goal_id"].as_str().unwrap().to_owned();

    let (status, body) =
      send(&router, "DELETE", &format!("/categories/{cat_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("goal"));

    // Remove the goal; the delete now goes through.
    let (status, _) =
      send(&router, "DELETE", &format!("/goals/{goal_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) =
      send(&router, "DELETE", &format!("/categories/{cat_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
  }

  #[tokio::test]
  async fn deleting_a_missing_category_is_404() {
    let (router, _, _) = make_router().await;
    let (status, _) = send(
      &router,
      "DELETE",
      &format!("/categories/{}", Uuid::new_v4()),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Goals ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn goal_validation_runs_before_the_store() {
    let (router, store, owner) = make_router().await;

    let (status, body) = send(
      &router,
      "POST",
      "/goals",
      Some(json!({
        "category_id": Uuid::new_v4(),
        "year": 2026,
        "title": "   ",
        "kind": "BOOLEAN",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("title"));
    assert!(store.list_goals(owner, 2026).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn goals_are_listed_per_year_in_manual_order() {
    let (router, _, _) = make_router().await;
    let category_id = Uuid::new_v4().to_string();

    let mut ids = Vec::new();
    for title in ["a", "b"] {
      let (_, goal) = send(
        &router,
        "POST",
        "/goals",
        Some(json!({
          "category_id": category_id,
          "year": 2026,
          "title": title,
          "kind": "BOOLEAN",
        })),
      )
      .await;
      ids.push(goal["goal_id"].as_str().unwrap().to_owned());
    }

    let (status, _) = send(
      &router,
      "PUT",
      "/goals/reorder",
      Some(json!({"ordered_ids": [ids[1], ids[0]]})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(&router, "GET", "/goals?year=2026", None).await;
    let titles: Vec<&str> = listed
      .as_array()
      .unwrap()
      .iter()
      .map(|g| g["title"].as_str().unwrap())
      .collect();
    assert_eq!(titles, ["b", "a"]);

    let (_, other_year) = send(&router, "GET", "/goals?year=2025", None).await;
    assert!(other_year.as_array().unwrap().is_empty());
  }

  // ── Records ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn record_upsert_and_clear_through_http() {
    let (router, _, _) = make_router().await;
    let goal_id = Uuid::new_v4().to_string();

    let (status, first) = send(
      &router,
      "PUT",
      "/records",
      Some(json!({
        "goal_id": goal_id,
        "year": 2026,
        "month": 6,
        "status": "HOLD",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "HOLD");

    // Second write to the same cell replaces in place.
    let (_, second) = send(
      &router,
      "PUT",
      "/records",
      Some(json!({
        "goal_id": goal_id,
        "year": 2026,
        "month": 6,
        "status": "SUCCESS",
      })),
    )
    .await;
    assert_eq!(second["record_id"], first["record_id"]);
    assert_eq!(second["status"], "SUCCESS");

    // Clear: null value fields, row survives.
    let (_, cleared) = send(
      &router,
      "PUT",
      "/records",
      Some(json!({"goal_id": goal_id, "year": 2026, "month": 6})),
    )
    .await;
    assert_eq!(cleared["status"], Value::Null);

    let (_, listed) =
      send(&router, "GET", "/records?year=2026&month=6", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn record_month_is_validated_as_bad_request() {
    let (router, _, _) = make_router().await;
    let (status, _) = send(
      &router,
      "PUT",
      "/records",
      Some(json!({"goal_id": Uuid::new_v4(), "year": 2026, "month": 13})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Journal ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn retrospective_round_trips_per_month() {
    let (router, _, _) = make_router().await;

    let (_, absent) =
      send(&router, "GET", "/retrospectives?year=2026&month=3", None).await;
    assert_eq!(absent, Value::Null);

    let (status, _) = send(
      &router,
      "PUT",
      "/retrospectives",
      Some(json!({"year": 2026, "month": 3, "content": "<p>좋았다</p>"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) =
      send(&router, "GET", "/retrospectives?year=2026&month=3", None).await;
    assert_eq!(fetched["content"], "<p>좋았다</p>");
  }

  #[tokio::test]
  async fn resolution_round_trips_per_year() {
    let (router, _, _) = make_router().await;

    let (status, _) = send(
      &router,
      "PUT",
      "/resolutions",
      Some(json!({"year": 2026, "content": "<p>꾸준히</p>"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = send(&router, "GET", "/resolutions?year=2026", None).await;
    assert_eq!(fetched["content"], "<p>꾸준히</p>");
  }

  // ── Backup ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn backup_round_trip_into_an_empty_account() {
    let (router, _, _) = make_router().await;
    let category_id = Uuid::new_v4().to_string();

    let (_, goal) = send(
      &router,
      "POST",
      "/goals",
      Some(json!({
        "category_id": category_id,
        "year": 2026,
        "title": "독서",
        "kind": "NUMERIC",
        "target_value": 30,
        "unit": "권",
      })),
    )
    .await;
    let goal_id = goal["goal_id"].as_str().unwrap().to_owned();
    send(
      &router,
      "PUT",
      "/records",
      Some(json!({"goal_id": goal_id, "year": 2026, "month": 1, "numeric_value": 3})),
    )
    .await;
    send(
      &router,
      "PUT",
      "/resolutions",
      Some(json!({"year": 2026, "content": "<p>올해!</p>"})),
    )
    .await;

    let (status, document) = send(&router, "GET", "/backup", None).await;
    assert_eq!(status, StatusCode::OK);

    // Import into a different, empty account.
    let (other_router, other_store, other_owner) = make_router().await;
    let (status, counts) =
      send(&other_router, "POST", "/backup", Some(document)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(counts["imported"]["goals"], 1);
    assert_eq!(counts["imported"]["records"], 1);
    assert_eq!(counts["imported"]["resolutions"], 1);

    // Ids and content survive; scoping moved to the importing user.
    let goals = other_store.list_goals(other_owner, 2026).await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].goal_id.to_string(), goal_id);
    assert_eq!(goals[0].title, "독서");
    let records = other_store.year_records(other_owner, 2026).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].numeric_value, Some(3.0));
  }

  #[tokio::test]
  async fn malformed_backup_is_one_generic_error() {
    let (router, store, owner) = make_router().await;

    let resp = router
      .clone()
      .oneshot(
        Request::builder()
          .method("POST")
          .uri("/backup")
          .header(header::CONTENT_TYPE, "application/json")
          .body(Body::from("definitely not a backup"))
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing was partially imported.
    assert!(store.all_goals(owner).await.unwrap().is_empty());
  }

  // ── Profile & feedback ────────────────────────────────────────────────────

  #[tokio::test]
  async fn profile_get_and_update() {
    let (router, _, _) = make_router().await;

    let (status, me) = send(&router, "GET", "/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "haeun");

    let (_, updated) = send(
      &router,
      "PUT",
      "/profile",
      Some(json!({"email": "haeun@example.com"})),
    )
    .await;
    assert_eq!(updated["email"], "haeun@example.com");
  }

  #[tokio::test]
  async fn feedback_requires_a_message() {
    let (router, _, _) = make_router().await;

    let (status, _) = send(
      &router,
      "POST",
      "/feedback",
      Some(json!({"message": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      &router,
      "POST",
      "/feedback",
      Some(json!({"message": "월 이동이 조금 느려요"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
  }
}
