//! Tolerant backup document parser.
//!
//! Pipeline:
//!   raw &str
//!     └─ serde_json::Value
//!          └─ section arrays (modern keys, or flattened legacy `ls_*` dumps)
//!               └─ per-row field lookup accepting both snake_case and
//!                  camelCase spellings

use serde_json::{Map, Value};
use telos_core::{
  category::Category,
  goal::{Goal, GoalKind},
  journal::{Resolution, Retrospective},
  record::{MonthlyRecord, RecordStatus},
};
use uuid::Uuid;

use crate::{
  error::{Error, Result},
  Snapshot,
};

// ─── Entry point ─────────────────────────────────────────────────────────────

pub(crate) fn parse_document(input: &str) -> Result<Snapshot> {
  let value: Value = serde_json::from_str(input)?;
  let root = value.as_object().ok_or(Error::NotAnObject)?;

  // The legacy generation dumped flat `ls_*` keys; any of them present means
  // the whole document is in that shape.
  let rows = if root.keys().any(|k| k.starts_with("ls_")) {
    SectionRows {
      categories:     legacy_rows(root, "ls_categories")?,
      goals:          legacy_rows(root, "ls_goals")?,
      records:        legacy_rows(root, "ls_records")?,
      retrospectives: legacy_rows(root, "ls_retrospectives")?,
      resolutions:    legacy_rows(root, "ls_resolutions")?,
    }
  } else {
    SectionRows {
      categories:     modern_rows(root, "categories"),
      goals:          modern_rows(root, "goals"),
      records:        modern_rows(root, "records"),
      retrospectives: modern_rows(root, "retrospectives"),
      resolutions:    modern_rows(root, "resolutions"),
    }
  };

  Ok(Snapshot {
    categories: rows
      .categories
      .iter()
      .map(parse_category)
      .collect::<Result<_>>()?,
    goals: rows.goals.iter().map(parse_goal).collect::<Result<_>>()?,
    records: rows.records.iter().map(parse_record).collect::<Result<_>>()?,
    retrospectives: rows
      .retrospectives
      .iter()
      .map(parse_retrospective)
      .collect::<Result<_>>()?,
    resolutions: rows
      .resolutions
      .iter()
      .map(parse_resolution)
      .collect::<Result<_>>()?,
  })
}

struct SectionRows {
  categories:     Vec<Value>,
  goals:          Vec<Value>,
  records:        Vec<Value>,
  retrospectives: Vec<Value>,
  resolutions:    Vec<Value>,
}

/// A modern section: a top-level array, absent meaning empty.
fn modern_rows(root: &Map<String, Value>, key: &str) -> Vec<Value> {
  match root.get(key) {
    Some(Value::Array(rows)) => rows.clone(),
    _ => Vec::new(),
  }
}

/// A legacy section: a JSON *string* (sometimes already an object) holding
/// `{user_id: [rows]}`. Every user's rows are adopted.
fn legacy_rows(root: &Map<String, Value>, key: &str) -> Result<Vec<Value>> {
  let entry = match root.get(key) {
    Some(v) => v,
    None => return Ok(Vec::new()),
  };

  let per_user: Value = match entry {
    Value::String(inner) => serde_json::from_str(inner)
      .map_err(|_| Error::MalformedLegacyEntry { key: key.to_owned() })?,
    other => other.clone(),
  };

  let map = per_user
    .as_object()
    .ok_or_else(|| Error::MalformedLegacyEntry { key: key.to_owned() })?;

  let mut rows = Vec::new();
  for bucket in map.values() {
    let Some(items) = bucket.as_array() else {
      return Err(Error::MalformedLegacyEntry { key: key.to_owned() });
    };
    rows.extend(items.iter().cloned());
  }
  Ok(rows)
}

// ─── Field helpers ───────────────────────────────────────────────────────────

fn malformed(section: &'static str, detail: impl Into<String>) -> Error {
  Error::MalformedRow { section, detail: detail.into() }
}

fn row_object<'a>(section: &'static str, row: &'a Value) -> Result<&'a Map<String, Value>> {
  row
    .as_object()
    .ok_or_else(|| malformed(section, "row is not an object"))
}

/// Look a field up under any of its historical spellings.
fn field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
  names
    .iter()
    .find_map(|n| obj.get(*n))
    .filter(|v| !v.is_null())
}

fn row_id(section: &'static str, obj: &Map<String, Value>) -> Result<Uuid> {
  match field(obj, &["id"]) {
    // Rows from the legacy dump occasionally lack ids; mint one.
    None => Ok(Uuid::new_v4()),
    Some(Value::String(s)) => Uuid::parse_str(s)
      .map_err(|_| malformed(section, format!("bad id {s:?}"))),
    Some(other) => Err(malformed(section, format!("bad id {other}"))),
  }
}

fn uuid_field(
  section: &'static str,
  obj: &Map<String, Value>,
  names: &[&str],
) -> Result<Uuid> {
  let value = field(obj, names)
    .ok_or_else(|| malformed(section, format!("missing {}", names[0])))?;
  let s = value
    .as_str()
    .ok_or_else(|| malformed(section, format!("{} is not a string", names[0])))?;
  Uuid::parse_str(s).map_err(|_| malformed(section, format!("bad {} {s:?}", names[0])))
}

fn string_field(
  section: &'static str,
  obj: &Map<String, Value>,
  names: &[&str],
) -> Result<String> {
  field(obj, names)
    .and_then(Value::as_str)
    .map(str::to_owned)
    .ok_or_else(|| malformed(section, format!("missing {}", names[0])))
}

fn opt_string_field(obj: &Map<String, Value>, names: &[&str]) -> Option<String> {
  field(obj, names).and_then(Value::as_str).map(str::to_owned)
}

fn int_field(
  section: &'static str,
  obj: &Map<String, Value>,
  names: &[&str],
) -> Result<i64> {
  field(obj, names)
    .and_then(Value::as_i64)
    .ok_or_else(|| malformed(section, format!("missing {}", names[0])))
}

fn opt_f64_field(
  section: &'static str,
  obj: &Map<String, Value>,
  names: &[&str],
) -> Result<Option<f64>> {
  match field(obj, names) {
    None => Ok(None),
    Some(v) => v
      .as_f64()
      .map(Some)
      .ok_or_else(|| malformed(section, format!("{} is not a number", names[0]))),
  }
}

fn opt_bool_field(
  section: &'static str,
  obj: &Map<String, Value>,
  names: &[&str],
) -> Result<Option<bool>> {
  match field(obj, names) {
    None => Ok(None),
    Some(v) => v
      .as_bool()
      .map(Some)
      .ok_or_else(|| malformed(section, format!("{} is not a boolean", names[0]))),
  }
}

// ─── Row parsers ─────────────────────────────────────────────────────────────

fn parse_category(row: &Value) -> Result<Category> {
  const S: &str = "category";
  let obj = row_object(S, row)?;

  Ok(Category {
    category_id: row_id(S, obj)?,
    name:        string_field(S, obj, &["name"])?,
    color:       string_field(S, obj, &["color"])?,
    order_index: field(obj, &["order_index", "orderIndex"])
      .and_then(Value::as_i64)
      .unwrap_or(0),
  })
}

fn parse_goal(row: &Value) -> Result<Goal> {
  const S: &str = "goal";
  let obj = row_object(S, row)?;

  let kind = match string_field(S, obj, &["type", "kind"])?.as_str() {
    "NUMERIC" => GoalKind::Numeric,
    "BOOLEAN" => GoalKind::Boolean,
    other => return Err(malformed(S, format!("unknown goal type {other:?}"))),
  };

  Ok(Goal {
    goal_id:     row_id(S, obj)?,
    category_id: uuid_field(S, obj, &["category_id", "categoryId"])?,
    year:        int_field(S, obj, &["year"])? as i32,
    emoji:       opt_string_field(obj, &["emoji"]).unwrap_or_else(|| "🎯".to_owned()),
    title:       string_field(S, obj, &["title"])?,
    description: opt_string_field(obj, &["description"]),
    kind,
    target_value: opt_f64_field(S, obj, &["target_value", "targetValue"])?,
    unit:        opt_string_field(obj, &["unit"]),
    order_index: field(obj, &["order_index", "orderIndex"])
      .and_then(Value::as_i64)
      .unwrap_or(0),
  })
}

fn parse_record(row: &Value) -> Result<MonthlyRecord> {
  const S: &str = "record";
  let obj = row_object(S, row)?;

  let status = match opt_string_field(obj, &["status"]) {
    None => None,
    Some(s) => match s.as_str() {
      "SUCCESS" => Some(RecordStatus::Success),
      "FAIL" => Some(RecordStatus::Fail),
      "HOLD" => Some(RecordStatus::Hold),
      other => return Err(malformed(S, format!("unknown status {other:?}"))),
    },
  };

  Ok(MonthlyRecord {
    record_id:     row_id(S, obj)?,
    goal_id:       uuid_field(S, obj, &["goal_id", "goalId"])?,
    year:          int_field(S, obj, &["year"])? as i32,
    month:         int_field(S, obj, &["month"])? as u32,
    numeric_value: opt_f64_field(S, obj, &["numeric_value", "numericValue"])?,
    status,
    achieved:      opt_bool_field(S, obj, &["achieved"])?,
  })
}

fn parse_retrospective(row: &Value) -> Result<Retrospective> {
  const S: &str = "retrospective";
  let obj = row_object(S, row)?;

  Ok(Retrospective {
    retrospective_id: row_id(S, obj)?,
    year:    int_field(S, obj, &["year"])? as i32,
    month:   int_field(S, obj, &["month"])? as u32,
    content: string_field(S, obj, &["content"])?,
  })
}

fn parse_resolution(row: &Value) -> Result<Resolution> {
  const S: &str = "resolution";
  let obj = row_object(S, row)?;

  Ok(Resolution {
    resolution_id: row_id(S, obj)?,
    year:    int_field(S, obj, &["year"])? as i32,
    content: string_field(S, obj, &["content"])?,
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_valued_numbers_are_kept() {
    // `0` must never be read as "absent".
    let row = serde_json::json!({
      "id": Uuid::new_v4().to_string(),
      "goal_id": Uuid::new_v4().to_string(),
      "year": 2026,
      "month": 1,
      "numericValue": 0,
    });
    let record = parse_record(&row).unwrap();
    assert_eq!(record.numeric_value, Some(0.0));
  }

  #[test]
  fn null_fields_read_as_absent() {
    let row = serde_json::json!({
      "id": Uuid::new_v4().to_string(),
      "goal_id": Uuid::new_v4().to_string(),
      "year": 2026,
      "month": 1,
      "numeric_value": null,
      "status": null,
      "achieved": null,
    });
    let record = parse_record(&row).unwrap();
    assert_eq!(record.numeric_value, None);
    assert_eq!(record.status, None);
    assert_eq!(record.achieved, None);
  }

  #[test]
  fn snake_case_wins_when_both_spellings_exist() {
    let row = serde_json::json!({
      "id": Uuid::new_v4().to_string(),
      "goal_id": Uuid::new_v4().to_string(),
      "year": 2026,
      "month": 1,
      "numeric_value": 5,
      "numericValue": 9,
    });
    assert_eq!(parse_record(&row).unwrap().numeric_value, Some(5.0));
  }

  #[test]
  fn goal_without_emoji_gets_the_default() {
    let row = serde_json::json!({
      "id": Uuid::new_v4().to_string(),
      "category_id": Uuid::new_v4().to_string(),
      "year": 2026,
      "title": "무제",
      "type": "BOOLEAN",
    });
    assert_eq!(parse_goal(&row).unwrap().emoji, "🎯");
  }

  #[test]
  fn unknown_goal_type_is_an_error() {
    let row = serde_json::json!({
      "id": Uuid::new_v4().to_string(),
      "category_id": Uuid::new_v4().to_string(),
      "year": 2026,
      "title": "무제",
      "type": "WEEKLY",
    });
    assert!(parse_goal(&row).is_err());
  }
}
