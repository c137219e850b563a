//! Error types for `telos-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::goal::MAX_DESCRIPTION_CHARS;

#[derive(Debug, Error)]
pub enum Error {
  #[error("category not found: {0}")]
  CategoryNotFound(Uuid),

  #[error("goal not found: {0}")]
  GoalNotFound(Uuid),

  #[error("category {category_id} still has {goals} goal(s); move or delete them first")]
  CategoryInUse { category_id: Uuid, goals: usize },

  #[error("goal title must not be empty")]
  EmptyTitle,

  #[error("goal description is {len} characters; the limit is {}", MAX_DESCRIPTION_CHARS)]
  DescriptionTooLong { len: usize },

  #[error("month must be 1-12, got {0}")]
  MonthOutOfRange(u32),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
