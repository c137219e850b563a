//! The server principal and user-submitted feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account row. Every stored entity is scoped to exactly one user; the
/// server creates the row for its configured principal on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub user_id:  Uuid,
  pub username: String,
  pub email:    Option<String>,
  /// URL of the profile photo served by the blob store.
  pub profile_photo_url: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// A feedback submission. Append-only; never shown back in the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
  pub feedback_id: Uuid,
  pub email:       String,
  pub message:     String,
  pub created_at:  DateTime<Utc>,
}
