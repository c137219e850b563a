//! Error type for `telos-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] telos_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("stored value could not be decoded: {0}")]
  Decode(String),

  #[error("category not found: {0}")]
  CategoryNotFound(Uuid),

  #[error("goal not found: {0}")]
  GoalNotFound(Uuid),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  /// Deleting a category is refused while goals still reference it.
  #[error("category {category_id} still has {goals} goal(s); move or delete them first")]
  CategoryInUse { category_id: Uuid, goals: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
