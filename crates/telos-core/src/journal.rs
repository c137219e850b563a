//! Free-form writing attached to a period: a monthly retrospective and a
//! yearly resolution. Content is opaque rich text; the core never inspects it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Monthly retrospective note. At most one per (owner, year, month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retrospective {
  pub retrospective_id: Uuid,
  pub year:    i32,
  pub month:   u32,
  pub content: String,
}

/// Yearly resolution. At most one per (owner, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
  pub resolution_id: Uuid,
  pub year:    i32,
  pub content: String,
}
