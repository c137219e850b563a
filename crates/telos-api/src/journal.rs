//! Handlers for `/retrospectives` and `/resolutions`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/retrospectives` | `?year=&month=`; null when none written |
//! | `PUT`  | `/retrospectives` | Upsert on (year, month) |
//! | `GET`  | `/resolutions` | `?year=`; null when none written |
//! | `PUT`  | `/resolutions` | Upsert on year |

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use telos_core::{
  journal::{Resolution, Retrospective},
  store::PlannerStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Retrospectives ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RetrospectiveParams {
  pub year:  i32,
  pub month: u32,
}

/// `GET /retrospectives?year=<year>&month=<1-12>`
pub async fn get_retrospective<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<RetrospectiveParams>,
) -> Result<Json<Option<Retrospective>>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let retrospective = state
    .store
    .get_retrospective(state.owner, params.year, params.month)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(retrospective))
}

#[derive(Debug, Deserialize)]
pub struct RetrospectiveBody {
  pub year:    i32,
  pub month:   u32,
  pub content: String,
}

/// `PUT /retrospectives` — one note per (year, month); rewrites replace the
/// content and keep the period's row id.
pub async fn put_retrospective<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<RetrospectiveBody>,
) -> Result<Json<Retrospective>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !(1..=12).contains(&body.month) {
    return Err(ApiError::BadRequest(format!(
      "month must be 1-12, got {}",
      body.month
    )));
  }

  let retrospective = Retrospective {
    retrospective_id: Uuid::new_v4(),
    year:    body.year,
    month:   body.month,
    content: body.content,
  };
  let stored = state
    .store
    .put_retrospective(state.owner, retrospective)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(stored))
}

// ─── Resolutions ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResolutionParams {
  pub year: i32,
}

/// `GET /resolutions?year=<year>`
pub async fn get_resolution<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ResolutionParams>,
) -> Result<Json<Option<Resolution>>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let resolution = state
    .store
    .get_resolution(state.owner, params.year)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(resolution))
}

#[derive(Debug, Deserialize)]
pub struct ResolutionBody {
  pub year:    i32,
  pub content: String,
}

/// `PUT /resolutions` — one per year.
pub async fn put_resolution<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ResolutionBody>,
) -> Result<Json<Resolution>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let resolution = Resolution {
    resolution_id: Uuid::new_v4(),
    year:    body.year,
    content: body.content,
  };
  let stored = state
    .store
    .put_resolution(state.owner, resolution)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(stored))
}
