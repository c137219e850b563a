//! Record reconciliation — the one place with real branching logic.
//!
//! Three pure functions: normalise a cell's effective status across the
//! legacy two-state and current tri-state representations, summarise a
//! goal's year, and split a month's goals into pending and completed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  category::{Category, ORPHAN_CATEGORY_RANK},
  goal::{Goal, GoalKind},
  record::{MonthlyRecord, RecordStatus},
};

// ─── Status normalizer ───────────────────────────────────────────────────────

/// Resolve a cell's effective tri-state status.
///
/// Rows written before the tri-state migration carry only the boolean
/// `achieved` flag; rows written since carry `status`. When both are present
/// `status` wins. Must stay stable as long as any stored row predates the
/// migration.
pub fn effective_status(record: Option<&MonthlyRecord>) -> Option<RecordStatus> {
  let record = record?;
  if let Some(status) = record.status {
    return Some(status);
  }
  match record.achieved {
    Some(true) => Some(RecordStatus::Success),
    Some(false) => Some(RecordStatus::Fail),
    None => None,
  }
}

/// Whether a cell holds a usable value for the given goal kind.
///
/// Boolean goals need a resolvable status; numeric goals need a non-null
/// value. A cleared row (all value fields null) counts as absent.
pub fn has_usable_value(goal: &Goal, record: Option<&MonthlyRecord>) -> bool {
  match goal.kind {
    GoalKind::Boolean => effective_status(record).is_some(),
    GoalKind::Numeric => record.is_some_and(|r| r.numeric_value.is_some()),
  }
}

// ─── Progress aggregator ─────────────────────────────────────────────────────

/// Coarse presentation band for a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
  /// ≥ 100%
  Complete,
  /// 50-99%
  OnTrack,
  /// < 50%
  Behind,
}

impl ProgressBand {
  pub fn of_percent(percent: i64) -> Self {
    if percent >= 100 {
      Self::Complete
    } else if percent >= 50 {
      Self::OnTrack
    } else {
      Self::Behind
    }
  }
}

/// A goal's standing across the whole year, computed from its records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum YearSummary {
  /// No record rows exist for the goal. Distinct from 0% progress.
  NoData,
  /// Boolean goals: the latest recorded month's normalized status.
  Status { status: RecordStatus },
  /// Numeric goals with a positive target: rounded percentage of target.
  Percent { percent: i64, band: ProgressBand },
  /// Numeric goals without a target: the raw sum, unit passed through for
  /// display.
  Total { sum: f64, unit: Option<String> },
}

/// Summarise `goal`'s year from `records` (any month mix; rows for other
/// goals are ignored).
///
/// Numeric goals sum `numeric_value` across all their rows, missing values
/// counting as zero, and report `round(100 * sum / target)` when a positive
/// target is set. Boolean goals report the newest month's effective status.
pub fn year_summary(goal: &Goal, records: &[MonthlyRecord]) -> YearSummary {
  let mut rows: Vec<&MonthlyRecord> =
    records.iter().filter(|r| r.goal_id == goal.goal_id).collect();

  if rows.is_empty() {
    return YearSummary::NoData;
  }

  match goal.kind {
    GoalKind::Boolean => {
      rows.sort_by_key(|r| std::cmp::Reverse(r.month));
      match effective_status(rows.first().copied()) {
        Some(status) => YearSummary::Status { status },
        None => YearSummary::NoData,
      }
    }
    GoalKind::Numeric => {
      let sum: f64 = rows.iter().filter_map(|r| r.numeric_value).sum();
      match goal.target_value {
        Some(target) if target > 0.0 => {
          let percent = (100.0 * sum / target).round() as i64;
          YearSummary::Percent {
            percent,
            band: ProgressBand::of_percent(percent),
          }
        }
        _ => YearSummary::Total {
          sum,
          unit: goal.unit.clone(),
        },
      }
    }
  }
}

// ─── Pending/completed partitioner ───────────────────────────────────────────

/// A month's goals split into the two disjoint check-in groups.
#[derive(Debug, Clone, Default)]
pub struct MonthPartition {
  /// No usable value recorded yet for this month.
  pub pending:   Vec<Goal>,
  /// A usable value exists.
  pub completed: Vec<Goal>,
}

/// Split `goals` by whether a usable value exists among `records` (the
/// active month's rows). Both groups are sorted by (category position, goal
/// position); goals whose category has been deleted sort after everything
/// else.
pub fn partition_month(
  goals:      &[Goal],
  records:    &[MonthlyRecord],
  categories: &[Category],
) -> MonthPartition {
  let by_goal: HashMap<Uuid, &MonthlyRecord> =
    records.iter().map(|r| (r.goal_id, r)).collect();
  let category_rank: HashMap<Uuid, i64> = categories
    .iter()
    .map(|c| (c.category_id, c.order_index))
    .collect();

  let mut partition = MonthPartition::default();
  for goal in goals {
    let record = by_goal.get(&goal.goal_id).copied();
    if has_usable_value(goal, record) {
      partition.completed.push(goal.clone());
    } else {
      partition.pending.push(goal.clone());
    }
  }

  let sort_key = |g: &Goal| {
    let rank = category_rank
      .get(&g.category_id)
      .copied()
      .unwrap_or(ORPHAN_CATEGORY_RANK);
    (rank, g.order_index)
  };
  partition.pending.sort_by_key(sort_key);
  partition.completed.sort_by_key(sort_key);

  partition
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn record(goal_id: Uuid, month: u32) -> MonthlyRecord {
    MonthlyRecord {
      record_id: Uuid::new_v4(),
      goal_id,
      year: 2026,
      month,
      numeric_value: None,
      status: None,
      achieved: None,
    }
  }

  fn numeric_goal(target: Option<f64>, unit: Option<&str>) -> Goal {
    Goal {
      goal_id:      Uuid::new_v4(),
      category_id:  Uuid::new_v4(),
      year:         2026,
      emoji:        "📚".into(),
      title:        "독서".into(),
      description:  None,
      kind:         GoalKind::Numeric,
      target_value: target,
      unit:         unit.map(str::to_owned),
      order_index:  0,
    }
  }

  fn boolean_goal() -> Goal {
    Goal {
      goal_id:      Uuid::new_v4(),
      category_id:  Uuid::new_v4(),
      year:         2026,
      emoji:        "🏃".into(),
      title:        "아침 달리기".into(),
      description:  None,
      kind:         GoalKind::Boolean,
      target_value: None,
      unit:         None,
      order_index:  0,
    }
  }

  // ── effective_status ──────────────────────────────────────────────────────

  #[test]
  fn no_record_has_no_status() {
    assert_eq!(effective_status(None), None);
  }

  #[test]
  fn tri_state_field_wins_over_legacy_flag() {
    let mut r = record(Uuid::new_v4(), 3);
    r.status = Some(RecordStatus::Hold);
    r.achieved = Some(true);
    assert_eq!(effective_status(Some(&r)), Some(RecordStatus::Hold));
  }

  #[test]
  fn legacy_flag_maps_to_success_or_fail() {
    let mut r = record(Uuid::new_v4(), 3);
    r.achieved = Some(true);
    assert_eq!(effective_status(Some(&r)), Some(RecordStatus::Success));

    r.achieved = Some(false);
    assert_eq!(effective_status(Some(&r)), Some(RecordStatus::Fail));
  }

  #[test]
  fn cleared_row_has_no_status() {
    let r = record(Uuid::new_v4(), 3);
    assert_eq!(effective_status(Some(&r)), None);
  }

  // ── year_summary, numeric ─────────────────────────────────────────────────

  #[test]
  fn single_record_against_target() {
    // target 30일, one month of 28 → round(100·28/30) = 93%.
    let goal = numeric_goal(Some(30.0), Some("일"));
    let mut r = record(goal.goal_id, 6);
    r.numeric_value = Some(28.0);

    assert_eq!(
      year_summary(&goal, &[r]),
      YearSummary::Percent { percent: 93, band: ProgressBand::OnTrack }
    );
  }

  #[test]
  fn percent_is_summed_across_months_and_can_exceed_100() {
    let goal = numeric_goal(Some(30.0), Some("일"));
    let rows: Vec<MonthlyRecord> = (1..=4)
      .map(|m| {
        let mut r = record(goal.goal_id, m);
        r.numeric_value = Some(10.0);
        r
      })
      .collect();

    assert_eq!(
      year_summary(&goal, &rows),
      YearSummary::Percent { percent: 133, band: ProgressBand::Complete }
    );
  }

  #[test]
  fn band_edges() {
    assert_eq!(ProgressBand::of_percent(100), ProgressBand::Complete);
    assert_eq!(ProgressBand::of_percent(99), ProgressBand::OnTrack);
    assert_eq!(ProgressBand::of_percent(50), ProgressBand::OnTrack);
    assert_eq!(ProgressBand::of_percent(49), ProgressBand::Behind);
    assert_eq!(ProgressBand::of_percent(0), ProgressBand::Behind);
  }

  #[test]
  fn zero_records_is_no_data_not_zero_percent() {
    let goal = numeric_goal(Some(30.0), Some("일"));
    assert_eq!(year_summary(&goal, &[]), YearSummary::NoData);

    // An all-zero row is real data: 0%, not NoData.
    let mut r = record(goal.goal_id, 1);
    r.numeric_value = Some(0.0);
    assert_eq!(
      year_summary(&goal, &[r]),
      YearSummary::Percent { percent: 0, band: ProgressBand::Behind }
    );
  }

  #[test]
  fn missing_monthly_values_count_as_zero() {
    let goal = numeric_goal(Some(10.0), None);
    let mut with_value = record(goal.goal_id, 1);
    with_value.numeric_value = Some(5.0);
    let cleared = record(goal.goal_id, 2);

    assert_eq!(
      year_summary(&goal, &[with_value, cleared]),
      YearSummary::Percent { percent: 50, band: ProgressBand::OnTrack }
    );
  }

  #[test]
  fn no_target_reports_raw_total_with_unit() {
    let goal = numeric_goal(None, Some("km"));
    let mut a = record(goal.goal_id, 1);
    a.numeric_value = Some(12.5);
    let mut b = record(goal.goal_id, 2);
    b.numeric_value = Some(7.5);

    assert_eq!(
      year_summary(&goal, &[a, b]),
      YearSummary::Total { sum: 20.0, unit: Some("km".into()) }
    );
  }

  #[test]
  fn other_goals_records_are_ignored() {
    let goal = numeric_goal(Some(10.0), None);
    let mut other = record(Uuid::new_v4(), 1);
    other.numeric_value = Some(999.0);

    assert_eq!(year_summary(&goal, &[other]), YearSummary::NoData);
  }

  // ── year_summary, boolean ─────────────────────────────────────────────────

  #[test]
  fn boolean_summary_uses_latest_month() {
    let goal = boolean_goal();
    let mut march = record(goal.goal_id, 3);
    march.status = Some(RecordStatus::Success);
    let mut july = record(goal.goal_id, 7);
    july.status = Some(RecordStatus::Hold);

    assert_eq!(
      year_summary(&goal, &[march, july]),
      YearSummary::Status { status: RecordStatus::Hold }
    );
  }

  #[test]
  fn boolean_summary_reads_legacy_rows() {
    let goal = boolean_goal();
    let mut r = record(goal.goal_id, 5);
    r.achieved = Some(false);

    assert_eq!(
      year_summary(&goal, &[r]),
      YearSummary::Status { status: RecordStatus::Fail }
    );
  }

  #[test]
  fn boolean_summary_with_only_cleared_rows_is_no_data() {
    let goal = boolean_goal();
    let r = record(goal.goal_id, 5);
    assert_eq!(year_summary(&goal, &[r]), YearSummary::NoData);
  }

  // ── partition_month ───────────────────────────────────────────────────────

  fn category_at(order_index: i64) -> Category {
    Category::new("분류", "bg-gray-100 text-gray-700", order_index)
  }

  #[test]
  fn partition_is_total_and_disjoint() {
    let cat = category_at(0);
    let mut done = boolean_goal();
    done.category_id = cat.category_id;
    let mut held = boolean_goal();
    held.category_id = cat.category_id;
    let mut open = boolean_goal();
    open.category_id = cat.category_id;
    let mut counted = numeric_goal(Some(10.0), None);
    counted.category_id = cat.category_id;
    let mut uncounted = numeric_goal(Some(10.0), None);
    uncounted.category_id = cat.category_id;

    let mut done_r = record(done.goal_id, 6);
    done_r.status = Some(RecordStatus::Success);
    let mut held_r = record(held.goal_id, 6);
    held_r.status = Some(RecordStatus::Hold);
    let mut counted_r = record(counted.goal_id, 6);
    counted_r.numeric_value = Some(3.0);
    // A cleared row for `uncounted`: present but unusable.
    let uncounted_r = record(uncounted.goal_id, 6);

    let goals = vec![
      done.clone(),
      held.clone(),
      open.clone(),
      counted.clone(),
      uncounted.clone(),
    ];
    let records = vec![done_r, held_r, counted_r, uncounted_r];
    let split = partition_month(&goals, &records, &[cat]);

    let pending: Vec<Uuid> = split.pending.iter().map(|g| g.goal_id).collect();
    let completed: Vec<Uuid> = split.completed.iter().map(|g| g.goal_id).collect();

    assert_eq!(pending.len() + completed.len(), goals.len());
    for g in &goals {
      assert_ne!(
        pending.contains(&g.goal_id),
        completed.contains(&g.goal_id),
        "goal must appear in exactly one partition",
      );
    }

    // HOLD counts as recorded; a cleared numeric row does not.
    assert!(completed.contains(&held.goal_id));
    assert!(pending.contains(&uncounted.goal_id));
    assert!(pending.contains(&open.goal_id));
  }

  #[test]
  fn partitions_sort_by_category_then_goal_order() {
    let first = category_at(0);
    let second = category_at(1);

    let mut g_late = boolean_goal();
    g_late.category_id = second.category_id;
    g_late.order_index = 0;
    let mut g_second = boolean_goal();
    g_second.category_id = first.category_id;
    g_second.order_index = 1;
    let mut g_first = boolean_goal();
    g_first.category_id = first.category_id;
    g_first.order_index = 0;

    let split = partition_month(
      &[g_late.clone(), g_second.clone(), g_first.clone()],
      &[],
      &[second, first],
    );

    let order: Vec<Uuid> = split.pending.iter().map(|g| g.goal_id).collect();
    assert_eq!(order, vec![g_first.goal_id, g_second.goal_id, g_late.goal_id]);
    assert!(split.completed.is_empty());
  }

  #[test]
  fn orphaned_goals_sort_last() {
    let cat = category_at(5);
    let mut orphan = boolean_goal();
    orphan.order_index = 0; // would sort first if its category counted
    let mut kept = boolean_goal();
    kept.category_id = cat.category_id;
    kept.order_index = 9;

    let split =
      partition_month(&[orphan.clone(), kept.clone()], &[], &[cat]);

    let order: Vec<Uuid> = split.pending.iter().map(|g| g.goal_id).collect();
    assert_eq!(order, vec![kept.goal_id, orphan.goal_id]);
  }
}
