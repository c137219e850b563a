//! Monthly record — one cell in the goal × month grid.
//!
//! A cell is written by explicit user action only: a status tap, a numeric
//! entry, or a clear. Clearing upserts the row with both value fields null,
//! which reads back as "absent"; the row itself is kept.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// The tri-state judgement for boolean goals.
///
/// Wire tags are uppercase for compatibility with stored rows and backup
/// files produced by earlier versions of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
  Success,
  Fail,
  Hold,
}

/// One (goal, year, month) cell. At most one row exists per cell; writes go
/// through a natural-key upsert with last-write-wins semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
  pub record_id: Uuid,
  pub goal_id:   Uuid,
  pub year:      i32,
  /// Calendar month, 1-12.
  pub month:     u32,
  /// Value for numeric goals.
  pub numeric_value: Option<f64>,
  /// Value for boolean goals.
  pub status:    Option<RecordStatus>,
  /// Deprecated two-state predecessor of `status`. Retained so rows written
  /// before the tri-state migration still read correctly; never derive the
  /// effective state from it directly — use
  /// [`crate::progress::effective_status`].
  pub achieved:  Option<bool>,
}

/// Input to [`crate::store::PlannerStore::upsert_record`].
/// The row UUID is assigned by the store on first insert.
#[derive(Debug, Clone)]
pub struct NewRecord {
  pub goal_id:       Uuid,
  pub year:          i32,
  pub month:         u32,
  pub numeric_value: Option<f64>,
  pub status:        Option<RecordStatus>,
  pub achieved:      Option<bool>,
}

impl NewRecord {
  /// An empty cell write — the "record again" control.
  pub fn clear(goal_id: Uuid, year: i32, month: u32) -> Self {
    Self {
      goal_id,
      year,
      month,
      numeric_value: None,
      status: None,
      achieved: None,
    }
  }

  pub fn validate(&self) -> Result<()> {
    if !(1..=12).contains(&self.month) {
      return Err(Error::MonthOutOfRange(self.month));
    }
    Ok(())
  }
}
