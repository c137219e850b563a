//! Handler for `POST /feedback`.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use serde::Deserialize;
use telos_core::store::PlannerStore;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct FeedbackBody {
  /// Reply address; submissions without one are recorded as anonymous.
  pub email:   Option<String>,
  pub message: String,
}

/// `POST /feedback` — append-only; an empty message is rejected up front.
pub async fn submit<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<FeedbackBody>,
) -> Result<StatusCode, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.message.trim().is_empty() {
    return Err(ApiError::BadRequest("feedback message must not be empty".into()));
  }

  let email = body
    .email
    .filter(|e| !e.trim().is_empty())
    .unwrap_or_else(|| "anonymous".to_owned());

  state
    .store
    .add_feedback(email, body.message)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
