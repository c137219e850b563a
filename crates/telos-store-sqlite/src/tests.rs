//! Integration tests for `SqliteStore` against an in-memory database.

use telos_core::{
  category::Category,
  goal::{Goal, GoalKind},
  journal::{Resolution, Retrospective},
  record::{NewRecord, RecordStatus},
  store::PlannerStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn owner(s: &SqliteStore) -> Uuid {
  s.get_or_create_user("haeun").await.unwrap().user_id
}

fn category(name: &str, order_index: i64) -> Category {
  Category::new(name, "bg-blue-100 text-blue-700", order_index)
}

fn boolean_goal(category_id: Uuid, title: &str) -> Goal {
  Goal {
    goal_id:      Uuid::new_v4(),
    category_id,
    year:         2026,
    emoji:        "🏃".into(),
    title:        title.into(),
    description:  None,
    kind:         GoalKind::Boolean,
    target_value: None,
    unit:         None,
    order_index:  0,
  }
}

fn numeric_goal(category_id: Uuid, title: &str, target: f64, unit: &str) -> Goal {
  Goal {
    goal_id:      Uuid::new_v4(),
    category_id,
    year:         2026,
    emoji:        "📚".into(),
    title:        title.into(),
    description:  None,
    kind:         GoalKind::Numeric,
    target_value: Some(target),
    unit:         Some(unit.into()),
    order_index:  0,
  }
}

fn status_cell(goal_id: Uuid, month: u32, status: RecordStatus) -> NewRecord {
  NewRecord {
    goal_id,
    year: 2026,
    month,
    numeric_value: None,
    status: Some(status),
    achieved: None,
  }
}

fn numeric_cell(goal_id: Uuid, month: u32, value: f64) -> NewRecord {
  NewRecord {
    goal_id,
    year: 2026,
    month,
    numeric_value: Some(value),
    status: None,
    achieved: None,
  }
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_and_list_categories_in_order() {
  let s = store().await;
  let me = owner(&s).await;

  s.upsert_category(me, category("커리어", 1)).await.unwrap();
  s.upsert_category(me, category("건강", 0)).await.unwrap();

  let listed = s.list_categories(me).await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].name, "건강");
  assert_eq!(listed[1].name, "커리어");
}

#[tokio::test]
async fn upsert_category_updates_in_place() {
  let s = store().await;
  let me = owner(&s).await;

  let mut cat = category("운동", 0);
  s.upsert_category(me, cat.clone()).await.unwrap();

  cat.name = "건강".into();
  cat.color = "bg-red-100 text-red-700".into();
  s.upsert_category(me, cat.clone()).await.unwrap();

  let listed = s.list_categories(me).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0], cat);
}

#[tokio::test]
async fn seeding_inserts_defaults_only_once() {
  let s = store().await;
  let me = owner(&s).await;

  let seeded = s.seed_default_categories(me).await.unwrap();
  assert_eq!(seeded.len(), 3);
  assert_eq!(seeded[0].name, "건강");

  // Second call is a no-op.
  let again = s.seed_default_categories(me).await.unwrap();
  assert!(again.is_empty());
  assert_eq!(s.list_categories(me).await.unwrap().len(), 3);
}

#[tokio::test]
async fn seeding_skips_owners_with_categories() {
  let s = store().await;
  let me = owner(&s).await;

  s.upsert_category(me, category("직접 만든 분류", 0)).await.unwrap();
  let seeded = s.seed_default_categories(me).await.unwrap();
  assert!(seeded.is_empty());
  assert_eq!(s.list_categories(me).await.unwrap().len(), 1);
}

#[tokio::test]
async fn reorder_categories_rewrites_positions() {
  let s = store().await;
  let me = owner(&s).await;

  let a = category("a", 0);
  let b = category("b", 1);
  let c = category("c", 2);
  for cat in [&a, &b, &c] {
    s.upsert_category(me, cat.clone()).await.unwrap();
  }

  s.reorder_categories(me, vec![c.category_id, a.category_id, b.category_id])
    .await
    .unwrap();

  let listed = s.list_categories(me).await.unwrap();
  let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, ["c", "a", "b"]);
}

#[tokio::test]
async fn delete_category_in_use_is_rejected() {
  let s = store().await;
  let me = owner(&s).await;

  let cat = category("건강", 0);
  s.upsert_category(me, cat.clone()).await.unwrap();
  s.upsert_goal(me, boolean_goal(cat.category_id, "달리기"))
    .await
    .unwrap();

  let err = s.delete_category(me, cat.category_id).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::CategoryInUse { goals: 1, .. }
  ));

  // Still present.
  assert_eq!(s.list_categories(me).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_category_succeeds_once_empty() {
  let s = store().await;
  let me = owner(&s).await;

  let cat = category("건강", 0);
  s.upsert_category(me, cat.clone()).await.unwrap();
  let goal = boolean_goal(cat.category_id, "달리기");
  s.upsert_goal(me, goal.clone()).await.unwrap();

  s.delete_goal(me, goal.goal_id).await.unwrap();
  s.delete_category(me, cat.category_id).await.unwrap();
  assert!(s.list_categories(me).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_category_errors() {
  let s = store().await;
  let me = owner(&s).await;
  let err = s.delete_category(me, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, crate::Error::CategoryNotFound(_)));
}

// ─── Goals ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_goals_is_scoped_to_year() {
  let s = store().await;
  let me = owner(&s).await;

  let cat = category("건강", 0);
  s.upsert_category(me, cat.clone()).await.unwrap();

  let this_year = boolean_goal(cat.category_id, "달리기");
  let mut last_year = boolean_goal(cat.category_id, "수영");
  last_year.year = 2025;
  s.upsert_goal(me, this_year.clone()).await.unwrap();
  s.upsert_goal(me, last_year).await.unwrap();

  let listed = s.list_goals(me, 2026).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].goal_id, this_year.goal_id);

  assert_eq!(s.all_goals(me).await.unwrap().len(), 2);
}

#[tokio::test]
async fn upsert_goal_roundtrips_all_fields() {
  let s = store().await;
  let me = owner(&s).await;

  let cat = category("자기개발", 0);
  s.upsert_category(me, cat.clone()).await.unwrap();

  let mut goal = numeric_goal(cat.category_id, "독서", 30.0, "권");
  goal.description = Some("한 달에 두세 권".into());
  s.upsert_goal(me, goal.clone()).await.unwrap();

  let listed = s.list_goals(me, 2026).await.unwrap();
  assert_eq!(listed, vec![goal]);
}

#[tokio::test]
async fn deleting_a_goal_keeps_its_records() {
  let s = store().await;
  let me = owner(&s).await;

  let cat = category("건강", 0);
  s.upsert_category(me, cat.clone()).await.unwrap();
  let goal = boolean_goal(cat.category_id, "달리기");
  s.upsert_goal(me, goal.clone()).await.unwrap();
  s.upsert_record(me, status_cell(goal.goal_id, 3, RecordStatus::Success))
    .await
    .unwrap();

  s.delete_goal(me, goal.goal_id).await.unwrap();

  assert!(s.list_goals(me, 2026).await.unwrap().is_empty());
  let records = s.year_records(me, 2026).await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].goal_id, goal.goal_id);
}

#[tokio::test]
async fn reorder_goals_rewrites_positions() {
  let s = store().await;
  let me = owner(&s).await;

  let cat = category("건강", 0);
  s.upsert_category(me, cat.clone()).await.unwrap();
  let a = boolean_goal(cat.category_id, "a");
  let b = boolean_goal(cat.category_id, "b");
  s.upsert_goal(me, a.clone()).await.unwrap();
  s.upsert_goal(me, b.clone()).await.unwrap();

  s.reorder_goals(me, vec![b.goal_id, a.goal_id]).await.unwrap();

  let listed = s.list_goals(me, 2026).await.unwrap();
  let titles: Vec<&str> = listed.iter().map(|g| g.title.as_str()).collect();
  assert_eq!(titles, ["b", "a"]);
}

// ─── Monthly records ─────────────────────────────────────────────────────────

#[tokio::test]
async fn record_upsert_keeps_one_row_per_cell() {
  let s = store().await;
  let me = owner(&s).await;
  let goal_id = Uuid::new_v4();

  let first = s
    .upsert_record(me, status_cell(goal_id, 6, RecordStatus::Hold))
    .await
    .unwrap();
  let second = s
    .upsert_record(me, status_cell(goal_id, 6, RecordStatus::Success))
    .await
    .unwrap();

  // Same cell, same row: the UUID survives and the value is the last write.
  assert_eq!(second.record_id, first.record_id);
  assert_eq!(second.status, Some(RecordStatus::Success));

  let rows = s.month_records(me, 2026, 6).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].status, Some(RecordStatus::Success));
}

#[tokio::test]
async fn different_cells_do_not_conflict() {
  let s = store().await;
  let me = owner(&s).await;
  let goal_id = Uuid::new_v4();

  s.upsert_record(me, numeric_cell(goal_id, 1, 10.0)).await.unwrap();
  s.upsert_record(me, numeric_cell(goal_id, 2, 12.0)).await.unwrap();
  s.upsert_record(me, numeric_cell(Uuid::new_v4(), 1, 3.0))
    .await
    .unwrap();

  assert_eq!(s.year_records(me, 2026).await.unwrap().len(), 3);
  assert_eq!(s.month_records(me, 2026, 1).await.unwrap().len(), 2);
}

#[tokio::test]
async fn clearing_a_cell_nulls_the_row_but_keeps_it() {
  let s = store().await;
  let me = owner(&s).await;
  let goal_id = Uuid::new_v4();

  s.upsert_record(me, numeric_cell(goal_id, 4, 7.0)).await.unwrap();
  let cleared = s
    .upsert_record(me, NewRecord::clear(goal_id, 2026, 4))
    .await
    .unwrap();

  assert_eq!(cleared.numeric_value, None);
  assert_eq!(cleared.status, None);
  assert_eq!(cleared.achieved, None);
  assert_eq!(s.month_records(me, 2026, 4).await.unwrap().len(), 1);
}

#[tokio::test]
async fn record_month_is_validated() {
  let s = store().await;
  let me = owner(&s).await;

  let err = s
    .upsert_record(me, NewRecord::clear(Uuid::new_v4(), 2026, 13))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(telos_core::Error::MonthOutOfRange(13))
  ));
}

#[tokio::test]
async fn legacy_achieved_flag_roundtrips() {
  let s = store().await;
  let me = owner(&s).await;
  let goal_id = Uuid::new_v4();

  let mut input = NewRecord::clear(goal_id, 2026, 2);
  input.achieved = Some(true);
  s.upsert_record(me, input).await.unwrap();

  let rows = s.month_records(me, 2026, 2).await.unwrap();
  assert_eq!(rows[0].achieved, Some(true));
  assert_eq!(rows[0].status, None);
}

// ─── Retrospectives and resolutions ──────────────────────────────────────────

#[tokio::test]
async fn retrospective_is_one_per_month() {
  let s = store().await;
  let me = owner(&s).await;

  let first = Retrospective {
    retrospective_id: Uuid::new_v4(),
    year:    2026,
    month:   3,
    content: "<p>좋은 한 달</p>".into(),
  };
  s.put_retrospective(me, first.clone()).await.unwrap();

  let replacement = Retrospective {
    retrospective_id: Uuid::new_v4(),
    year:    2026,
    month:   3,
    content: "<p>다시 쓴 회고</p>".into(),
  };
  let stored = s.put_retrospective(me, replacement).await.unwrap();

  // The period keeps its original row id; only the content changes.
  assert_eq!(stored.retrospective_id, first.retrospective_id);
  assert_eq!(stored.content, "<p>다시 쓴 회고</p>");

  let fetched = s.get_retrospective(me, 2026, 3).await.unwrap().unwrap();
  assert_eq!(fetched.content, "<p>다시 쓴 회고</p>");
  assert!(s.get_retrospective(me, 2026, 4).await.unwrap().is_none());
}

#[tokio::test]
async fn resolution_is_one_per_year() {
  let s = store().await;
  let me = owner(&s).await;

  let first = Resolution {
    resolution_id: Uuid::new_v4(),
    year:    2026,
    content: "<p>올해는 꾸준히</p>".into(),
  };
  s.put_resolution(me, first.clone()).await.unwrap();

  let replacement = Resolution {
    resolution_id: Uuid::new_v4(),
    year:    2026,
    content: "<p>더 꾸준히</p>".into(),
  };
  let stored = s.put_resolution(me, replacement).await.unwrap();
  assert_eq!(stored.resolution_id, first.resolution_id);

  assert_eq!(s.all_resolutions(me).await.unwrap().len(), 1);
  assert!(s.get_resolution(me, 2025).await.unwrap().is_none());
}

// ─── Owner scoping ───────────────────────────────────────────────────────────

#[tokio::test]
async fn owners_never_see_each_other() {
  let s = store().await;
  let me = owner(&s).await;
  let other = s.get_or_create_user("minsu").await.unwrap().user_id;

  let cat = category("건강", 0);
  s.upsert_category(me, cat.clone()).await.unwrap();
  let goal = boolean_goal(cat.category_id, "달리기");
  s.upsert_goal(me, goal.clone()).await.unwrap();
  s.upsert_record(me, status_cell(goal.goal_id, 1, RecordStatus::Success))
    .await
    .unwrap();

  assert!(s.list_categories(other).await.unwrap().is_empty());
  assert!(s.list_goals(other, 2026).await.unwrap().is_empty());
  assert!(s.year_records(other, 2026).await.unwrap().is_empty());

  // The same cell key under another owner is a distinct row.
  s.upsert_record(other, status_cell(goal.goal_id, 1, RecordStatus::Fail))
    .await
    .unwrap();
  let mine = s.month_records(me, 2026, 1).await.unwrap();
  assert_eq!(mine[0].status, Some(RecordStatus::Success));
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_or_create_user_is_idempotent() {
  let s = store().await;

  let first = s.get_or_create_user("haeun").await.unwrap();
  let again = s.get_or_create_user("haeun").await.unwrap();
  assert_eq!(first.user_id, again.user_id);

  let fetched = s.get_user(first.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.username, "haeun");
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_profile_merges_fields() {
  let s = store().await;
  let me = s.get_or_create_user("haeun").await.unwrap();

  let with_email = s
    .update_profile(me.user_id, Some("haeun@example.com".into()), None)
    .await
    .unwrap();
  assert_eq!(with_email.email.as_deref(), Some("haeun@example.com"));

  // Updating the photo alone leaves the email in place.
  let with_photo = s
    .update_profile(me.user_id, None, Some("/photos/abc.jpg".into()))
    .await
    .unwrap();
  assert_eq!(with_photo.email.as_deref(), Some("haeun@example.com"));
  assert_eq!(with_photo.profile_photo_url.as_deref(), Some("/photos/abc.jpg"));
}

#[tokio::test]
async fn update_profile_for_missing_user_errors() {
  let s = store().await;
  let err = s
    .update_profile(Uuid::new_v4(), None, None)
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::UserNotFound(_)));
}
