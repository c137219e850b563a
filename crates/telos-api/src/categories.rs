//! Handlers for `/categories` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/categories` | Seeds the starter set for an empty account |
//! | `POST`   | `/categories` | Body: [`CategoryBody`] |
//! | `PUT`    | `/categories/reorder` | Body: `{"ordered_ids":[…]}` |
//! | `DELETE` | `/categories/:id` | 409 while goals reference it |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use telos_core::{category::Category, store::PlannerStore};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /categories`
///
/// An account with no categories gets the starter set seeded before the
/// first listing, so clients never see an empty board.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Category>>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut categories = state
    .store
    .list_categories(state.owner)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if categories.is_empty() {
    state
      .store
      .seed_default_categories(state.owner)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
    categories = state
      .store
      .list_categories(state.owner)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }

  Ok(Json(categories))
}

// ─── Create / update ─────────────────────────────────────────────────────────

/// JSON body accepted by `POST /categories`.
#[derive(Debug, Deserialize)]
pub struct CategoryBody {
  /// Omitted for a new category; present to update one in place.
  pub id:    Option<Uuid>,
  pub name:  String,
  pub color: String,
  #[serde(default)]
  pub order_index: i64,
}

/// `POST /categories` — returns 201 + the stored row.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<CategoryBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("category name must not be empty".into()));
  }

  let category = Category {
    category_id: body.id.unwrap_or_else(Uuid::new_v4),
    name:        body.name,
    color:       body.color,
    order_index: body.order_index,
  };

  let stored = state
    .store
    .upsert_category(state.owner, category)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Reorder ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReorderBody {
  pub ordered_ids: Vec<Uuid>,
}

/// `PUT /categories/reorder` — positions become the new `order_index`es.
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
    .reorder_categories(state.owner, body.ordered_ids)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /categories/:id`
///
/// The referential check runs here, before the store is asked to delete
/// anything — a category with goals is never touched.
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let categories = state
    .store
    .list_categories(state.owner)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !categories.iter().any(|c| c.category_id == id) {
    return Err(ApiError::NotFound(format!("category {id} not found")));
  }

  let referencing = state
    .store
    .all_goals(state.owner)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .into_iter()
    .filter(|g| g.category_id == id)
    .count();
  if referencing > 0 {
    return Err(ApiError::Conflict(format!(
      "category {id} still has {referencing} goal(s); move or delete them first"
    )));
  }

  state
    .store
    .delete_category(state.owner, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
