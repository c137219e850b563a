//! JSON backup codec for telos.
//!
//! Converts between backup documents and [`telos_core`] domain types. Pure
//! synchronous; no HTTP or database dependencies.
//!
//! Three document generations are readable:
//! - the current export (top-level arrays of snake_case rows),
//! - older exports with camelCase field spellings, and
//! - the legacy flat key-value dump whose `ls_*` entries hold JSON strings of
//!   per-user row maps.
//!
//! Only the current form is ever written.
//!
//! # Quick start
//!
//! ```no_run
//! let snapshot = telos_backup::parse(r#"{"categories":[],"goals":[]}"#).unwrap();
//! let document = telos_backup::to_json(&snapshot).unwrap();
//! ```

pub mod error;
mod export;
mod import;

pub use error::{Error, Result};
use telos_core::{
  category::Category,
  goal::Goal,
  journal::{Resolution, Retrospective},
  record::MonthlyRecord,
};

// ─── Public types ────────────────────────────────────────────────────────────

/// Every row of one owner's data, detached from its owner.
///
/// Import assigns the whole snapshot to the importing user; ids and content
/// are preserved as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
  pub categories:     Vec<Category>,
  pub goals:          Vec<Goal>,
  pub records:        Vec<MonthlyRecord>,
  pub retrospectives: Vec<Retrospective>,
  pub resolutions:    Vec<Resolution>,
}

impl Snapshot {
  pub fn is_empty(&self) -> bool {
    self.categories.is_empty()
      && self.goals.is_empty()
      && self.records.is_empty()
      && self.retrospectives.is_empty()
      && self.resolutions.is_empty()
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse a backup document in any readable generation.
///
/// A failure is a single error — partial imports are never reported.
pub fn parse(input: &str) -> Result<Snapshot> {
  import::parse_document(input)
}

/// Serialize `snapshot` as the current export document.
pub fn to_json(snapshot: &Snapshot) -> Result<String> {
  export::to_json(snapshot)
}

// ─── Round-trip tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip_tests {
  use telos_core::{
    goal::GoalKind,
    record::RecordStatus,
  };
  use uuid::Uuid;

  use super::{test_helpers::full_snapshot, *};

  #[test]
  fn export_then_import_reconstructs_the_snapshot() {
    let snapshot = full_snapshot();
    let document = to_json(&snapshot).expect("serialization failed");
    let parsed = parse(&document).expect("parse failed");

    assert_eq!(parsed, snapshot);
  }

  #[test]
  fn exported_rows_use_the_storage_column_names() {
    let snapshot = full_snapshot();
    let document = to_json(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&document).unwrap();

    let goal = &value["goals"][0];
    assert!(goal.get("id").is_some());
    assert!(goal.get("category_id").is_some());
    assert!(goal.get("target_value").is_some());
    assert_eq!(goal["type"], "NUMERIC");

    let record = &value["records"][0];
    assert!(record.get("goal_id").is_some());
    assert!(record.get("numeric_value").is_some());
  }

  #[test]
  fn camel_case_rows_parse_like_snake_case() {
    let id = Uuid::new_v4();
    let goal_id = Uuid::new_v4();
    let category_id = Uuid::new_v4();

    let camel = format!(
      r#"{{
        "goals": [{{
          "id": "{id}",
          "categoryId": "{category_id}",
          "year": 2026,
          "emoji": "📚",
          "title": "독서",
          "type": "NUMERIC",
          "targetValue": 30,
          "unit": "권",
          "orderIndex": 2
        }}],
        "records": [{{
          "id": "{goal_id}",
          "goalId": "{id}",
          "year": 2026,
          "month": 5,
          "numericValue": 3
        }}]
      }}"#
    );

    let parsed = parse(&camel).unwrap();
    assert_eq!(parsed.goals.len(), 1);
    let goal = &parsed.goals[0];
    assert_eq!(goal.goal_id, id);
    assert_eq!(goal.category_id, category_id);
    assert_eq!(goal.kind, GoalKind::Numeric);
    assert_eq!(goal.target_value, Some(30.0));
    assert_eq!(goal.order_index, 2);

    let record = &parsed.records[0];
    assert_eq!(record.goal_id, id);
    assert_eq!(record.numeric_value, Some(3.0));
  }

  #[test]
  fn legacy_flat_dump_is_flattened_across_users() {
    // The `ls_*` generation stored, per table, a JSON *string* of
    // {user_id: [rows]}; rows from every user are adopted.
    let cat_a = Uuid::new_v4();
    let cat_b = Uuid::new_v4();
    let inner = format!(
      r#"{{
        "user-1": [{{"id": "{cat_a}", "name": "건강", "color": "bg-red-100 text-red-700"}}],
        "user-2": [{{"id": "{cat_b}", "name": "커리어", "color": "bg-blue-100 text-blue-700"}}]
      }}"#
    );
    let document = serde_json::json!({
      "ls_categories": inner,
      "ls_records": "{}",
    })
    .to_string();

    let parsed = parse(&document).unwrap();
    let mut ids: Vec<Uuid> =
      parsed.categories.iter().map(|c| c.category_id).collect();
    ids.sort();
    let mut expected = vec![cat_a, cat_b];
    expected.sort();
    assert_eq!(ids, expected);
    assert!(parsed.records.is_empty());
  }

  #[test]
  fn legacy_status_and_achieved_fields_survive() {
    let goal_id = Uuid::new_v4();
    let document = format!(
      r#"{{
        "records": [
          {{"id": "{}", "goal_id": "{goal_id}", "year": 2025, "month": 1, "achieved": true}},
          {{"id": "{}", "goal_id": "{goal_id}", "year": 2025, "month": 2, "status": "HOLD"}}
        ]
      }}"#,
      Uuid::new_v4(),
      Uuid::new_v4(),
    );

    let parsed = parse(&document).unwrap();
    assert_eq!(parsed.records[0].achieved, Some(true));
    assert_eq!(parsed.records[0].status, None);
    assert_eq!(parsed.records[1].status, Some(RecordStatus::Hold));
  }

  #[test]
  fn malformed_documents_fail_as_a_whole() {
    assert!(parse("not json at all").is_err());
    assert!(parse("[1, 2, 3]").is_err());
    // One bad row poisons the import; nothing partial is reported.
    assert!(
      parse(r#"{"goals": [{"id": "x", "title": 7}]}"#).is_err()
    );
  }

  #[test]
  fn missing_sections_parse_as_empty() {
    let parsed = parse("{}").unwrap();
    assert!(parsed.is_empty());
  }
}

// ─── Shared test helpers ─────────────────────────────────────────────────────
