//! Handlers for `/profile`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/profile` | The owner's account row |
//! | `PUT`  | `/profile` | Body: `{"email":"…"}`; photo updates go through the server's blob endpoint |

use axum::{
  Json,
  extract::State,
};
use serde::Deserialize;
use telos_core::{store::PlannerStore, user::User};

use crate::{ApiState, error::ApiError};

/// `GET /profile`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<User>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = state
    .store
    .get_user(state.owner)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("profile not found".into()))?;
  Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
  pub email: Option<String>,
}

/// `PUT /profile` — update the mutable contact fields.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ProfileBody>,
) -> Result<Json<User>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = state
    .store
    .update_profile(state.owner, body.email, None)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(user))
}
