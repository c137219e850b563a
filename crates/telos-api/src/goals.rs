//! Handlers for `/goals` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/goals` | `?year` required |
//! | `POST`   | `/goals` | Body: [`GoalBody`]; validated before the store |
//! | `PUT`    | `/goals/reorder` | Body: `{"ordered_ids":[…]}` |
//! | `DELETE` | `/goals/:id` | Records are kept |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use telos_core::{
  goal::{Goal, GoalKind},
  store::PlannerStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub year: i32,
}

/// `GET /goals?year=<year>`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Goal>>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let goals = state
    .store
    .list_goals(state.owner, params.year)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(goals))
}

// ─── Create / update ─────────────────────────────────────────────────────────

/// JSON body accepted by `POST /goals`.
#[derive(Debug, Deserialize)]
pub struct GoalBody {
  /// Omitted for a new goal; present to update one in place.
  pub id:          Option<Uuid>,
  pub category_id: Uuid,
  pub year:        i32,
  pub emoji:       Option<String>,
  pub title:       String,
  pub description: Option<String>,
  pub kind:        GoalKind,
  pub target_value: Option<f64>,
  pub unit:        Option<String>,
  #[serde(default)]
  pub order_index: i64,
}

impl From<GoalBody> for Goal {
  fn from(b: GoalBody) -> Self {
    Goal {
      goal_id:     b.id.unwrap_or_else(Uuid::new_v4),
      category_id: b.category_id,
      year:        b.year,
      emoji:       b.emoji.unwrap_or_else(|| "🎯".to_owned()),
      title:       b.title,
      description: b.description,
      kind:        b.kind,
      target_value: b.target_value,
      unit:        b.unit,
      order_index: b.order_index,
    }
  }
}

/// `POST /goals` — returns 201 + the stored row.
///
/// Validation failures (blank title, over-long description) surface as 400
/// without any store call.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<GoalBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let goal = Goal::from(body);
  goal
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let stored = state
    .store
    .upsert_goal(state.owner, goal)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Reorder ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReorderBody {
  pub ordered_ids: Vec<Uuid>,
}

/// `PUT /goals/reorder` — positions become the new `order_index`es.
pub async fn reorder<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ReorderBody>,
) -> Result<StatusCode, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .reorder_goals(state.owner, body.ordered_ids)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /goals/:id` — the goal's monthly records are left in place.
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let exists = state
    .store
    .all_goals(state.owner)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .iter()
    .any(|g| g.goal_id == id);
  if !exists {
    return Err(ApiError::NotFound(format!("goal {id} not found")));
  }

  state
    .store
    .delete_goal(state.owner, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
