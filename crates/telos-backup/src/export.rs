//! Serializer for the current backup document.
//!
//! Rows are written in the storage column shape: snake_case keys, plain `id`,
//! no owner column (ownership is reassigned on import).

use serde::Serialize;
use telos_core::{
  category::Category,
  goal::{Goal, GoalKind},
  journal::{Resolution, Retrospective},
  record::{MonthlyRecord, RecordStatus},
};
use uuid::Uuid;

use crate::{error::Result, Snapshot};

// ─── Document rows ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CategoryRow<'a> {
  id:          Uuid,
  name:        &'a str,
  color:       &'a str,
  order_index: i64,
}

#[derive(Serialize)]
struct GoalRow<'a> {
  id:          Uuid,
  category_id: Uuid,
  year:        i32,
  emoji:       &'a str,
  title:       &'a str,
  description: Option<&'a str>,
  #[serde(rename = "type")]
  kind:        GoalKind,
  target_value: Option<f64>,
  unit:        Option<&'a str>,
  order_index: i64,
}

#[derive(Serialize)]
struct RecordRow {
  id:            Uuid,
  goal_id:       Uuid,
  year:          i32,
  month:         u32,
  numeric_value: Option<f64>,
  status:        Option<RecordStatus>,
  achieved:      Option<bool>,
}

#[derive(Serialize)]
struct RetrospectiveRow<'a> {
  id:      Uuid,
  year:    i32,
  month:   u32,
  content: &'a str,
}

#[derive(Serialize)]
struct ResolutionRow<'a> {
  id:      Uuid,
  year:    i32,
  content: &'a str,
}

#[derive(Serialize)]
struct Document<'a> {
  categories:     Vec<CategoryRow<'a>>,
  goals:          Vec<GoalRow<'a>>,
  records:        Vec<RecordRow>,
  retrospectives: Vec<RetrospectiveRow<'a>>,
  resolutions:    Vec<ResolutionRow<'a>>,
}

// ─── Conversion ──────────────────────────────────────────────────────────────

fn category_row(c: &Category) -> CategoryRow<'_> {
  CategoryRow {
    id:          c.category_id,
    name:        &c.name,
    color:       &c.color,
    order_index: c.order_index,
  }
}

fn goal_row(g: &Goal) -> GoalRow<'_> {
  GoalRow {
    id:          g.goal_id,
    category_id: g.category_id,
    year:        g.year,
    emoji:       &g.emoji,
    title:       &g.title,
    description: g.description.as_deref(),
    kind:        g.kind,
    target_value: g.target_value,
    unit:        g.unit.as_deref(),
    order_index: g.order_index,
  }
}

fn record_row(r: &MonthlyRecord) -> RecordRow {
  RecordRow {
    id:            r.record_id,
    goal_id:       r.goal_id,
    year:          r.year,
    month:         r.month,
    numeric_value: r.numeric_value,
    status:        r.status,
    achieved:      r.achieved,
  }
}

pub(crate) fn to_json(snapshot: &Snapshot) -> Result<String> {
  let document = Document {
    categories: snapshot.categories.iter().map(category_row).collect(),
    goals:      snapshot.goals.iter().map(goal_row).collect(),
    records:    snapshot.records.iter().map(record_row).collect(),
    retrospectives: snapshot
      .retrospectives
      .iter()
      .map(|r| RetrospectiveRow {
        id:      r.retrospective_id,
        year:    r.year,
        month:   r.month,
        content: &r.content,
      })
      .collect(),
    resolutions: snapshot
      .resolutions
      .iter()
      .map(|r| ResolutionRow {
        id:      r.resolution_id,
        year:    r.year,
        content: &r.content,
      })
      .collect(),
  };

  Ok(serde_json::to_string_pretty(&document)?)
}
