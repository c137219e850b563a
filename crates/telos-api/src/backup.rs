//! Handlers for `/backup` — full-account export and tolerant import.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/backup` | The current export document |
//! | `POST` | `/backup` | Accepts all readable generations; 400 on malformed |

use axum::{
  Json,
  extract::State,
  http::{StatusCode, header},
  response::IntoResponse,
};
use serde_json::json;
use telos_backup::Snapshot;
use telos_core::{record::NewRecord, store::PlannerStore};

use crate::{ApiState, error::ApiError};

// ─── Export ──────────────────────────────────────────────────────────────────

/// `GET /backup` — every row the owner has, as one JSON document.
pub async fn export<S>(
  State(state): State<ApiState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let store = &state.store;
  let owner = state.owner;

  let snapshot = Snapshot {
    categories: store
      .list_categories(owner)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?,
    goals: store
      .all_goals(owner)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?,
    records: store
      .all_records(owner)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?,
    retrospectives: store
      .all_retrospectives(owner)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?,
    resolutions: store
      .all_resolutions(owner)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?,
  };

  let document = telos_backup::to_json(&snapshot)
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((
    StatusCode::OK,
    [(header::CONTENT_TYPE, "application/json")],
    document,
  ))
}

// ─── Import ──────────────────────────────────────────────────────────────────

/// `POST /backup` — parse and adopt a backup document for the owner.
///
/// A document that cannot be read fails as a whole with one generic 400;
/// per-row detail is deliberately not reported.
pub async fn import<S>(
  State(state): State<ApiState<S>>,
  body: String,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let snapshot = telos_backup::parse(&body)
    .map_err(|_| ApiError::BadRequest("could not read backup file".into()))?;

  // Reject out-of-range months up front so a bad document never half-imports.
  let month_ok = |m: u32| (1..=12).contains(&m);
  if !snapshot.records.iter().all(|r| month_ok(r.month))
    || !snapshot.retrospectives.iter().all(|r| month_ok(r.month))
  {
    return Err(ApiError::BadRequest("could not read backup file".into()));
  }

  let store = &state.store;
  let owner = state.owner;

  for category in &snapshot.categories {
    store
      .upsert_category(owner, category.clone())
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }
  for goal in &snapshot.goals {
    store
      .upsert_goal(owner, goal.clone())
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }
  for record in &snapshot.records {
    let input = NewRecord {
      goal_id:       record.goal_id,
      year:          record.year,
      month:         record.month,
      numeric_value: record.numeric_value,
      status:        record.status,
      achieved:      record.achieved,
    };
    store
      .upsert_record(owner, input)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }
  for retrospective in &snapshot.retrospectives {
    store
      .put_retrospective(owner, retrospective.clone())
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }
  for resolution in &snapshot.resolutions {
    store
      .put_resolution(owner, resolution.clone())
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }

  Ok(Json(json!({
    "imported": {
      "categories":     snapshot.categories.len(),
      "goals":          snapshot.goals.len(),
      "records":        snapshot.records.len(),
      "retrospectives": snapshot.retrospectives.len(),
      "resolutions":    snapshot.resolutions.len(),
    }
  })))
}
