//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Enum discriminants use the same
//! uppercase tags as the wire format. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use telos_core::{
  category::Category,
  goal::{Goal, GoalKind},
  journal::{Resolution, Retrospective},
  record::{MonthlyRecord, RecordStatus},
  user::User,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("bad timestamp {s:?}: {e}")))
}

// ─── GoalKind ────────────────────────────────────────────────────────────────

pub fn encode_goal_kind(k: GoalKind) -> &'static str {
  match k {
    GoalKind::Numeric => "NUMERIC",
    GoalKind::Boolean => "BOOLEAN",
  }
}

pub fn decode_goal_kind(s: &str) -> Result<GoalKind> {
  match s {
    "NUMERIC" => Ok(GoalKind::Numeric),
    "BOOLEAN" => Ok(GoalKind::Boolean),
    other => Err(Error::Decode(format!("unknown goal kind: {other:?}"))),
  }
}

// ─── RecordStatus ────────────────────────────────────────────────────────────

pub fn encode_status(s: RecordStatus) -> &'static str {
  match s {
    RecordStatus::Success => "SUCCESS",
    RecordStatus::Fail => "FAIL",
    RecordStatus::Hold => "HOLD",
  }
}

pub fn decode_status(s: &str) -> Result<RecordStatus> {
  match s {
    "SUCCESS" => Ok(RecordStatus::Success),
    "FAIL" => Ok(RecordStatus::Fail),
    "HOLD" => Ok(RecordStatus::Hold),
    other => Err(Error::Decode(format!("unknown record status: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `categories` row.
pub struct RawCategory {
  pub category_id: String,
  pub name:        String,
  pub color:       String,
  pub order_index: i64,
}

impl RawCategory {
  pub fn into_category(self) -> Result<Category> {
    Ok(Category {
      category_id: decode_uuid(&self.category_id)?,
      name:        self.name,
      color:       self.color,
      order_index: self.order_index,
    })
  }
}

/// Raw values read directly from a `goals` row.
pub struct RawGoal {
  pub goal_id:      String,
  pub category_id:  String,
  pub year:         i32,
  pub emoji:        String,
  pub title:        String,
  pub description:  Option<String>,
  pub kind:         String,
  pub target_value: Option<f64>,
  pub unit:         Option<String>,
  pub order_index:  i64,
}

impl RawGoal {
  pub fn into_goal(self) -> Result<Goal> {
    Ok(Goal {
      goal_id:      decode_uuid(&self.goal_id)?,
      category_id:  decode_uuid(&self.category_id)?,
      year:         self.year,
      emoji:        self.emoji,
      title:        self.title,
      description:  self.description,
      kind:         decode_goal_kind(&self.kind)?,
      target_value: self.target_value,
      unit:         self.unit,
      order_index:  self.order_index,
    })
  }
}

/// Raw values read directly from a `monthly_records` row.
pub struct RawRecord {
  pub record_id:     String,
  pub goal_id:       String,
  pub year:          i32,
  pub month:         i64,
  pub numeric_value: Option<f64>,
  pub status:        Option<String>,
  pub achieved:      Option<bool>,
}

impl RawRecord {
  pub fn into_record(self) -> Result<MonthlyRecord> {
    Ok(MonthlyRecord {
      record_id:     decode_uuid(&self.record_id)?,
      goal_id:       decode_uuid(&self.goal_id)?,
      year:          self.year,
      month:         self.month as u32,
      numeric_value: self.numeric_value,
      status:        self.status.as_deref().map(decode_status).transpose()?,
      achieved:      self.achieved,
    })
  }
}

/// Raw values read directly from a `retrospectives` row.
pub struct RawRetrospective {
  pub retrospective_id: String,
  pub year:    i32,
  pub month:   i64,
  pub content: String,
}

impl RawRetrospective {
  pub fn into_retrospective(self) -> Result<Retrospective> {
    Ok(Retrospective {
      retrospective_id: decode_uuid(&self.retrospective_id)?,
      year:    self.year,
      month:   self.month as u32,
      content: self.content,
    })
  }
}

/// Raw values read directly from a `resolutions` row.
pub struct RawResolution {
  pub resolution_id: String,
  pub year:    i32,
  pub content: String,
}

impl RawResolution {
  pub fn into_resolution(self) -> Result<Resolution> {
    Ok(Resolution {
      resolution_id: decode_uuid(&self.resolution_id)?,
      year:    self.year,
      content: self.content,
    })
  }
}

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:  String,
  pub username: String,
  pub email:    Option<String>,
  pub profile_photo_url: Option<String>,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:  decode_uuid(&self.user_id)?,
      username: self.username,
      email:    self.email,
      profile_photo_url: self.profile_photo_url,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
