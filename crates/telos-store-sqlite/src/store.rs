//! [`SqliteStore`] — the SQLite implementation of [`PlannerStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use telos_core::{
  category::{Category, DEFAULT_CATEGORIES},
  goal::Goal,
  journal::{Resolution, Retrospective},
  record::{MonthlyRecord, NewRecord},
  store::PlannerStore,
  user::User,
};

use crate::{
  encode::{
    encode_dt, encode_goal_kind, encode_status, encode_uuid, RawCategory,
    RawGoal, RawRecord, RawResolution, RawRetrospective, RawUser,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A telos planner store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Count the goals referencing a category — the referential-integrity
  /// check performed before a category delete.
  async fn goals_in_category(
    &self,
    owner: Uuid,
    category_id: Uuid,
  ) -> Result<usize> {
    let owner_str = encode_uuid(owner);
    let cat_str   = encode_uuid(category_id);

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM goals WHERE owner_id = ?1 AND category_id = ?2",
          rusqlite::params![owner_str, cat_str],
          |r| r.get(0),
        )?)
      })
      .await?;

    Ok(count as usize)
  }
}

fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCategory> {
  Ok(RawCategory {
    category_id: row.get(0)?,
    name:        row.get(1)?,
    color:       row.get(2)?,
    order_index: row.get(3)?,
  })
}

fn goal_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawGoal> {
  Ok(RawGoal {
    goal_id:      row.get(0)?,
    category_id:  row.get(1)?,
    year:         row.get(2)?,
    emoji:        row.get(3)?,
    title:        row.get(4)?,
    description:  row.get(5)?,
    kind:         row.get(6)?,
    target_value: row.get(7)?,
    unit:         row.get(8)?,
    order_index:  row.get(9)?,
  })
}

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRecord> {
  Ok(RawRecord {
    record_id:     row.get(0)?,
    goal_id:       row.get(1)?,
    year:          row.get(2)?,
    month:         row.get(3)?,
    numeric_value: row.get(4)?,
    status:        row.get(5)?,
    achieved:      row.get(6)?,
  })
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:  row.get(0)?,
    username: row.get(1)?,
    email:    row.get(2)?,
    profile_photo_url: row.get(3)?,
    created_at: row.get(4)?,
  })
}

const GOAL_COLUMNS: &str = "goal_id, category_id, year, emoji, title, \
   description, kind, target_value, unit, order_index";

const RECORD_COLUMNS: &str =
  "record_id, goal_id, year, month, numeric_value, status, achieved";

// ─── PlannerStore impl ───────────────────────────────────────────────────────

impl PlannerStore for SqliteStore {
  type Error = Error;

  // ── Categories ────────────────────────────────────────────────────────────

  async fn list_categories(&self, owner: Uuid) -> Result<Vec<Category>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawCategory> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT category_id, name, color, order_index
           FROM categories WHERE owner_id = ?1
           ORDER BY order_index, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], category_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCategory::into_category).collect()
  }

  async fn seed_default_categories(&self, owner: Uuid) -> Result<Vec<Category>> {
    let seeded: Vec<Category> = DEFAULT_CATEGORIES
      .iter()
      .enumerate()
      .map(|(i, (name, color))| Category::new(*name, *color, i as i64))
      .collect();

    let owner_str = encode_uuid(owner);
    let rows: Vec<(String, String, String, i64)> = seeded
      .iter()
      .map(|c| {
        (
          encode_uuid(c.category_id),
          c.name.clone(),
          c.color.clone(),
          c.order_index,
        )
      })
      .collect();

    let inserted = self
      .conn
      .call(move |conn| {
        let existing: i64 = conn.query_row(
          "SELECT COUNT(*) FROM categories WHERE owner_id = ?1",
          rusqlite::params![owner_str],
          |r| r.get(0),
        )?;
        if existing > 0 {
          return Ok(false);
        }
        for (id, name, color, order_index) in &rows {
          conn.execute(
            "INSERT INTO categories (category_id, owner_id, name, color, order_index)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, owner_str, name, color, order_index],
          )?;
        }
        Ok(true)
      })
      .await?;

    Ok(if inserted { seeded } else { Vec::new() })
  }

  async fn upsert_category(&self, owner: Uuid, category: Category) -> Result<Category> {
    let id_str      = encode_uuid(category.category_id);
    let owner_str   = encode_uuid(owner);
    let name        = category.name.clone();
    let color       = category.color.clone();
    let order_index = category.order_index;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (category_id, owner_id, name, color, order_index)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT(category_id) DO UPDATE SET
             owner_id    = excluded.owner_id,
             name        = excluded.name,
             color       = excluded.color,
             order_index = excluded.order_index",
          rusqlite::params![id_str, owner_str, name, color, order_index],
        )?;
        Ok(())
      })
      .await?;

    Ok(category)
  }

  async fn reorder_categories(&self, owner: Uuid, ordered_ids: Vec<Uuid>) -> Result<()> {
    let owner_str = encode_uuid(owner);
    let ids: Vec<String> = ordered_ids.into_iter().map(encode_uuid).collect();

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "UPDATE categories SET order_index = ?1
           WHERE owner_id = ?2 AND category_id = ?3",
        )?;
        for (position, id) in ids.iter().enumerate() {
          stmt.execute(rusqlite::params![position as i64, owner_str, id])?;
        }
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn delete_category(&self, owner: Uuid, category_id: Uuid) -> Result<()> {
    let in_use = self.goals_in_category(owner, category_id).await?;
    if in_use > 0 {
      return Err(Error::CategoryInUse { category_id, goals: in_use });
    }

    let owner_str = encode_uuid(owner);
    let id_str    = encode_uuid(category_id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM categories WHERE owner_id = ?1 AND category_id = ?2",
          rusqlite::params![owner_str, id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::CategoryNotFound(category_id));
    }
    Ok(())
  }

  // ── Goals ─────────────────────────────────────────────────────────────────

  async fn list_goals(&self, owner: Uuid, year: i32) -> Result<Vec<Goal>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawGoal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {GOAL_COLUMNS} FROM goals
           WHERE owner_id = ?1 AND year = ?2
           ORDER BY order_index, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str, year], goal_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGoal::into_goal).collect()
  }

  async fn all_goals(&self, owner: Uuid) -> Result<Vec<Goal>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawGoal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {GOAL_COLUMNS} FROM goals
           WHERE owner_id = ?1
           ORDER BY year, order_index, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], goal_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGoal::into_goal).collect()
  }

  async fn upsert_goal(&self, owner: Uuid, goal: Goal) -> Result<Goal> {
    let goal_id_str  = encode_uuid(goal.goal_id);
    let owner_str    = encode_uuid(owner);
    let cat_id_str   = encode_uuid(goal.category_id);
    let year         = goal.year;
    let emoji        = goal.emoji.clone();
    let title        = goal.title.clone();
    let description  = goal.description.clone();
    let kind         = encode_goal_kind(goal.kind).to_owned();
    let target_value = goal.target_value;
    let unit         = goal.unit.clone();
    let order_index  = goal.order_index;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO goals (
             goal_id, owner_id, category_id, year, emoji, title,
             description, kind, target_value, unit, order_index
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
           ON CONFLICT(goal_id) DO UPDATE SET
             owner_id     = excluded.owner_id,
             category_id  = excluded.category_id,
             year         = excluded.year,
             emoji        = excluded.emoji,
             title        = excluded.title,
             description  = excluded.description,
             kind         = excluded.kind,
             target_value = excluded.target_value,
             unit         = excluded.unit,
             order_index  = excluded.order_index",
          rusqlite::params![
            goal_id_str,
            owner_str,
            cat_id_str,
            year,
            emoji,
            title,
            description,
            kind,
            target_value,
            unit,
            order_index,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(goal)
  }

  async fn reorder_goals(&self, owner: Uuid, ordered_ids: Vec<Uuid>) -> Result<()> {
    let owner_str = encode_uuid(owner);
    let ids: Vec<String> = ordered_ids.into_iter().map(encode_uuid).collect();

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "UPDATE goals SET order_index = ?1
           WHERE owner_id = ?2 AND goal_id = ?3",
        )?;
        for (position, id) in ids.iter().enumerate() {
          stmt.execute(rusqlite::params![position as i64, owner_str, id])?;
        }
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn delete_goal(&self, owner: Uuid, goal_id: Uuid) -> Result<()> {
    let owner_str = encode_uuid(owner);
    let id_str    = encode_uuid(goal_id);

    // Records are intentionally left in place.
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM goals WHERE owner_id = ?1 AND goal_id = ?2",
          rusqlite::params![owner_str, id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::GoalNotFound(goal_id));
    }
    Ok(())
  }

  // ── Monthly records ───────────────────────────────────────────────────────

  async fn upsert_record(&self, owner: Uuid, input: NewRecord) -> Result<MonthlyRecord> {
    input.validate().map_err(Error::Core)?;

    // Candidate UUID for a fresh cell; a conflicting row keeps its own.
    let candidate_id  = encode_uuid(Uuid::new_v4());
    let owner_str     = encode_uuid(owner);
    let goal_id_str   = encode_uuid(input.goal_id);
    let year          = input.year;
    let month         = input.month as i64;
    let numeric_value = input.numeric_value;
    let status        = input.status.map(|s| encode_status(s).to_owned());
    let achieved      = input.achieved;

    let raw: RawRecord = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO monthly_records (
             record_id, owner_id, goal_id, year, month,
             numeric_value, status, achieved
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT(owner_id, goal_id, year, month) DO UPDATE SET
             numeric_value = excluded.numeric_value,
             status        = excluded.status,
             achieved      = excluded.achieved",
          rusqlite::params![
            candidate_id,
            owner_str,
            goal_id_str,
            year,
            month,
            numeric_value,
            status,
            achieved,
          ],
        )?;

        Ok(conn.query_row(
          &format!(
            "SELECT {RECORD_COLUMNS} FROM monthly_records
             WHERE owner_id = ?1 AND goal_id = ?2 AND year = ?3 AND month = ?4"
          ),
          rusqlite::params![owner_str, goal_id_str, year, month],
          record_from_row,
        )?)
      })
      .await?;

    raw.into_record()
  }

  async fn month_records(&self, owner: Uuid, year: i32, month: u32) -> Result<Vec<MonthlyRecord>> {
    let owner_str = encode_uuid(owner);
    let month     = month as i64;

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM monthly_records
           WHERE owner_id = ?1 AND year = ?2 AND month = ?3"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str, year, month], record_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn year_records(&self, owner: Uuid, year: i32) -> Result<Vec<MonthlyRecord>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM monthly_records
           WHERE owner_id = ?1 AND year = ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str, year], record_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn all_records(&self, owner: Uuid) -> Result<Vec<MonthlyRecord>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM monthly_records
           WHERE owner_id = ?1
           ORDER BY year, month"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], record_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  // ── Retrospectives ────────────────────────────────────────────────────────

  async fn get_retrospective(
    &self,
    owner: Uuid,
    year:  i32,
    month: u32,
  ) -> Result<Option<Retrospective>> {
    let owner_str = encode_uuid(owner);
    let month     = month as i64;

    let raw: Option<RawRetrospective> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT retrospective_id, year, month, content FROM retrospectives
             WHERE owner_id = ?1 AND year = ?2 AND month = ?3",
            rusqlite::params![owner_str, year, month],
            |row| {
              Ok(RawRetrospective {
                retrospective_id: row.get(0)?,
                year:    row.get(1)?,
                month:   row.get(2)?,
                content: row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRetrospective::into_retrospective).transpose()
  }

  async fn put_retrospective(
    &self,
    owner: Uuid,
    retrospective: Retrospective,
  ) -> Result<Retrospective> {
    let id_str    = encode_uuid(retrospective.retrospective_id);
    let owner_str = encode_uuid(owner);
    let year      = retrospective.year;
    let month     = retrospective.month as i64;
    let content   = retrospective.content.clone();

    let raw: RawRetrospective = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO retrospectives (retrospective_id, owner_id, year, month, content)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT(owner_id, year, month) DO UPDATE SET
             content = excluded.content",
          rusqlite::params![id_str, owner_str, year, month, content],
        )?;

        Ok(conn.query_row(
          "SELECT retrospective_id, year, month, content FROM retrospectives
           WHERE owner_id = ?1 AND year = ?2 AND month = ?3",
          rusqlite::params![owner_str, year, month],
          |row| {
            Ok(RawRetrospective {
              retrospective_id: row.get(0)?,
              year:    row.get(1)?,
              month:   row.get(2)?,
              content: row.get(3)?,
            })
          },
        )?)
      })
      .await?;

    raw.into_retrospective()
  }

  async fn all_retrospectives(&self, owner: Uuid) -> Result<Vec<Retrospective>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawRetrospective> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT retrospective_id, year, month, content FROM retrospectives
           WHERE owner_id = ?1
           ORDER BY year, month",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], |row| {
            Ok(RawRetrospective {
              retrospective_id: row.get(0)?,
              year:    row.get(1)?,
              month:   row.get(2)?,
              content: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawRetrospective::into_retrospective)
      .collect()
  }

  // ── Resolutions ───────────────────────────────────────────────────────────

  async fn get_resolution(&self, owner: Uuid, year: i32) -> Result<Option<Resolution>> {
    let owner_str = encode_uuid(owner);

    let raw: Option<RawResolution> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT resolution_id, year, content FROM resolutions
             WHERE owner_id = ?1 AND year = ?2",
            rusqlite::params![owner_str, year],
            |row| {
              Ok(RawResolution {
                resolution_id: row.get(0)?,
                year:    row.get(1)?,
                content: row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawResolution::into_resolution).transpose()
  }

  async fn put_resolution(&self, owner: Uuid, resolution: Resolution) -> Result<Resolution> {
    let id_str    = encode_uuid(resolution.resolution_id);
    let owner_str = encode_uuid(owner);
    let year      = resolution.year;
    let content   = resolution.content.clone();

    let raw: RawResolution = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resolutions (resolution_id, owner_id, year, content)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(owner_id, year) DO UPDATE SET
             content = excluded.content",
          rusqlite::params![id_str, owner_str, year, content],
        )?;

        Ok(conn.query_row(
          "SELECT resolution_id, year, content FROM resolutions
           WHERE owner_id = ?1 AND year = ?2",
          rusqlite::params![owner_str, year],
          |row| {
            Ok(RawResolution {
              resolution_id: row.get(0)?,
              year:    row.get(1)?,
              content: row.get(2)?,
            })
          },
        )?)
      })
      .await?;

    raw.into_resolution()
  }

  async fn all_resolutions(&self, owner: Uuid) -> Result<Vec<Resolution>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawResolution> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT resolution_id, year, content FROM resolutions
           WHERE owner_id = ?1
           ORDER BY year",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], |row| {
            Ok(RawResolution {
              resolution_id: row.get(0)?,
              year:    row.get(1)?,
              content: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawResolution::into_resolution).collect()
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  fn get_or_create_user(
    &self,
    username: &str,
  ) -> impl std::future::Future<Output = Result<User>> + Send + '_ {
    let username     = username.to_owned();
    async move {
    let candidate_id = encode_uuid(Uuid::new_v4());
    let now_str      = encode_dt(Utc::now());

    let raw: RawUser = self
      .conn
      .call(move |conn| {
        let existing = conn
          .query_row(
            "SELECT user_id, username, email, profile_photo_url, created_at
             FROM users WHERE username = ?1",
            rusqlite::params![username],
            user_from_row,
          )
          .optional()?;

        if let Some(raw) = existing {
          return Ok(raw);
        }

        conn.execute(
          "INSERT INTO users (user_id, username, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![candidate_id, username, now_str],
        )?;

        Ok(conn.query_row(
          "SELECT user_id, username, email, profile_photo_url, created_at
           FROM users WHERE username = ?1",
          rusqlite::params![username],
          user_from_row,
        )?)
      })
      .await?;

    raw.into_user()
    }
  }

  async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(user_id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, username, email, profile_photo_url, created_at
             FROM users WHERE user_id = ?1",
            rusqlite::params![id_str],
            user_from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn update_profile(
    &self,
    user_id: Uuid,
    email: Option<String>,
    profile_photo_url: Option<String>,
  ) -> Result<User> {
    let id_str = encode_uuid(user_id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET
             email             = COALESCE(?2, email),
             profile_photo_url = COALESCE(?3, profile_photo_url)
           WHERE user_id = ?1",
          rusqlite::params![id_str, email, profile_photo_url],
        )?;

        Ok(conn
          .query_row(
            "SELECT user_id, username, email, profile_photo_url, created_at
             FROM users WHERE user_id = ?1",
            rusqlite::params![id_str],
            user_from_row,
          )
          .optional()?)
      })
      .await?;

    raw
      .ok_or(Error::UserNotFound(user_id))?
      .into_user()
  }

  // ── Feedback ──────────────────────────────────────────────────────────────

  async fn add_feedback(&self, email: String, message: String) -> Result<()> {
    let id_str  = encode_uuid(Uuid::new_v4());
    let now_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO feedback (feedback_id, email, message, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, email, message, now_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}
