//! The `PlannerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `telos-store-sqlite`).
//! Higher layers (`telos-api`, `telos-server`) depend on this abstraction,
//! not on any concrete backend.
//!
//! Every method is scoped to an `owner` — entities never cross user
//! boundaries, and all unique keys include the owner.

use std::future::Future;

use uuid::Uuid;

use crate::{
  category::Category,
  goal::Goal,
  journal::{Resolution, Retrospective},
  record::{MonthlyRecord, NewRecord},
  user::User,
};

/// Abstraction over a telos storage backend.
///
/// Writes to goals, categories, records, retrospectives, and resolutions are
/// upserts on their natural keys; concurrent writes to the same key resolve
/// last-write-wins. All methods return `Send` futures so the trait can be
/// used from multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PlannerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Categories ────────────────────────────────────────────────────────

  /// List the owner's categories, ordered by `order_index`.
  fn list_categories(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Insert the starter categories for an owner that has none.
  /// Returns the seeded rows; a no-op (empty result) when any exist.
  fn seed_default_categories(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Insert or update a category by its UUID.
  fn upsert_category(
    &self,
    owner: Uuid,
    category: Category,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;

  /// Rewrite `order_index` to each category's position in `ordered_ids`.
  /// Unknown ids are ignored.
  fn reorder_categories(
    &self,
    owner: Uuid,
    ordered_ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a category. Fails while any goal still references it — the
  /// check runs in application code before the row is touched.
  fn delete_category(
    &self,
    owner: Uuid,
    category_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Goals ─────────────────────────────────────────────────────────────

  /// List the owner's goals for one year, ordered by `order_index`.
  fn list_goals(
    &self,
    owner: Uuid,
    year: i32,
  ) -> impl Future<Output = Result<Vec<Goal>, Self::Error>> + Send + '_;

  /// List every goal the owner has, across all years. Used by export.
  fn all_goals(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<Goal>, Self::Error>> + Send + '_;

  /// Insert or update a goal by its UUID. Callers validate first
  /// ([`Goal::validate`]).
  fn upsert_goal(
    &self,
    owner: Uuid,
    goal: Goal,
  ) -> impl Future<Output = Result<Goal, Self::Error>> + Send + '_;

  /// Rewrite `order_index` to each goal's position in `ordered_ids`.
  fn reorder_goals(
    &self,
    owner: Uuid,
    ordered_ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a goal. Its monthly records are kept as orphaned history.
  fn delete_goal(
    &self,
    owner: Uuid,
    goal_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Monthly records ───────────────────────────────────────────────────

  /// Upsert one cell, keyed on (owner, goal, year, month). The row UUID is
  /// assigned on first insert and kept on update; last write wins.
  fn upsert_record(
    &self,
    owner: Uuid,
    input: NewRecord,
  ) -> impl Future<Output = Result<MonthlyRecord, Self::Error>> + Send + '_;

  /// All cells for one (year, month).
  fn month_records(
    &self,
    owner: Uuid,
    year: i32,
    month: u32,
  ) -> impl Future<Output = Result<Vec<MonthlyRecord>, Self::Error>> + Send + '_;

  /// All cells for one year.
  fn year_records(
    &self,
    owner: Uuid,
    year: i32,
  ) -> impl Future<Output = Result<Vec<MonthlyRecord>, Self::Error>> + Send + '_;

  /// Every record the owner has. Used by export.
  fn all_records(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<MonthlyRecord>, Self::Error>> + Send + '_;

  // ── Retrospectives ────────────────────────────────────────────────────

  /// The retrospective for (year, month), if one was written.
  fn get_retrospective(
    &self,
    owner: Uuid,
    year: i32,
    month: u32,
  ) -> impl Future<Output = Result<Option<Retrospective>, Self::Error>> + Send + '_;

  /// Upsert the retrospective for its (year, month).
  fn put_retrospective(
    &self,
    owner: Uuid,
    retrospective: Retrospective,
  ) -> impl Future<Output = Result<Retrospective, Self::Error>> + Send + '_;

  /// Every retrospective the owner has. Used by export.
  fn all_retrospectives(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<Retrospective>, Self::Error>> + Send + '_;

  // ── Resolutions ───────────────────────────────────────────────────────

  /// The resolution for `year`, if one was written.
  fn get_resolution(
    &self,
    owner: Uuid,
    year: i32,
  ) -> impl Future<Output = Result<Option<Resolution>, Self::Error>> + Send + '_;

  /// Upsert the resolution for its year.
  fn put_resolution(
    &self,
    owner: Uuid,
    resolution: Resolution,
  ) -> impl Future<Output = Result<Resolution, Self::Error>> + Send + '_;

  /// Every resolution the owner has. Used by export.
  fn all_resolutions(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<Resolution>, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Fetch the account row for `username`, creating it on first sight.
  fn get_or_create_user(
    &self,
    username: &str,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Fetch an account row by UUID. Returns `None` if not found.
  fn get_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Update the mutable profile fields. `None` leaves a field unchanged.
  fn update_profile(
    &self,
    user_id: Uuid,
    email: Option<String>,
    profile_photo_url: Option<String>,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  // ── Feedback ──────────────────────────────────────────────────────────

  /// Append a feedback row.
  fn add_feedback(
    &self,
    email: String,
    message: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
