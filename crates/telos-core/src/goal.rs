//! Goal — a yearly objective, either numeric (accumulate toward a target)
//! or boolean (achieve each month).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Maximum length of a goal description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Discriminates how a goal is recorded and evaluated.
///
/// Wire tags are uppercase for compatibility with stored rows and backup
/// files produced by earlier versions of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalKind {
  /// Monthly numbers summed across the year against `target_value`.
  Numeric,
  /// A per-month success / fail / hold judgement.
  Boolean,
}

/// A yearly objective owned by one user and grouped under a category.
///
/// Deleting a goal never cascades to its monthly records; they are kept as
/// orphaned history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
  pub goal_id:     Uuid,
  pub category_id: Uuid,
  pub year:        i32,
  pub emoji:       String,
  pub title:       String,
  pub description: Option<String>,
  pub kind:        GoalKind,
  /// Yearly target for numeric goals (e.g. 10 books, 100 km).
  pub target_value: Option<f64>,
  /// Display unit for numeric goals (e.g. "권", "km").
  pub unit:        Option<String>,
  /// Manual sort position within the category; lower sorts first.
  pub order_index: i64,
}

impl Goal {
  /// Check the invariants enforced before any goal write: a non-blank title
  /// and a description within [`MAX_DESCRIPTION_CHARS`].
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::EmptyTitle);
    }
    if let Some(desc) = &self.description {
      let len = desc.chars().count();
      if len > MAX_DESCRIPTION_CHARS {
        return Err(Error::DescriptionTooLong { len });
      }
    }
    Ok(())
  }
}
