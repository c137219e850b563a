//! Handlers for `/records` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/records` | `?year` required; optional `month` |
//! | `PUT`  | `/records` | Natural-key upsert; null fields clear the cell |

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use telos_core::{
  record::{MonthlyRecord, NewRecord, RecordStatus},
  store::PlannerStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub year:  i32,
  /// If set, restrict to one month's cells.
  pub month: Option<u32>,
}

/// `GET /records?year=<year>[&month=<1-12>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<MonthlyRecord>>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = match params.month {
    Some(month) => {
      state
        .store
        .month_records(state.owner, params.year, month)
        .await
    }
    None => state.store.year_records(state.owner, params.year).await,
  }
  .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /records`. Omitting every value field writes an
/// empty cell — the "record again" reset.
#[derive(Debug, Deserialize)]
pub struct RecordBody {
  pub goal_id: Uuid,
  pub year:    i32,
  pub month:   u32,
  pub numeric_value: Option<f64>,
  pub status:  Option<RecordStatus>,
  pub achieved: Option<bool>,
}

impl From<RecordBody> for NewRecord {
  fn from(b: RecordBody) -> Self {
    NewRecord {
      goal_id:       b.goal_id,
      year:          b.year,
      month:         b.month,
      numeric_value: b.numeric_value,
      status:        b.status,
      achieved:      b.achieved,
    }
  }
}

/// `PUT /records` — returns the stored cell; the row UUID is stable across
/// rewrites of the same (goal, year, month).
pub async fn upsert<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<RecordBody>,
) -> Result<Json<MonthlyRecord>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = NewRecord::from(body);
  input
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let stored = state
    .store
    .upsert_record(state.owner, input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(stored))
}
