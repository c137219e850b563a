//! Category — a user-defined grouping for goals.
//!
//! Categories carry a manual sort order and an opaque color token. The token
//! is a semantic style label chosen by the client; the core never parses it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sort rank assigned to goals whose category no longer exists.
/// Such goals always land after every real category.
pub const ORPHAN_CATEGORY_RANK: i64 = i64::MAX;

/// A goal grouping with a display color and a manual position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub category_id: Uuid,
  pub name:        String,
  /// Opaque semantic style token (e.g. a palette class name). Never parsed.
  pub color:       String,
  /// Manual sort position; lower sorts first.
  pub order_index: i64,
}

impl Category {
  /// Construct a category with a fresh UUID, placed at `order_index`.
  pub fn new(name: impl Into<String>, color: impl Into<String>, order_index: i64) -> Self {
    Self {
      category_id: Uuid::new_v4(),
      name:        name.into(),
      color:       color.into(),
      order_index,
    }
  }
}

/// The starter categories seeded for an owner with none.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
  ("건강", "bg-red-100 text-red-700"),
  ("커리어", "bg-blue-100 text-blue-700"),
  ("자기개발", "bg-green-100 text-green-700"),
];
