//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use telos_core::{
  category::Category,
  goal::{Goal, GoalKind},
  progress::{self, MonthPartition, YearSummary},
  record::{MonthlyRecord, NewRecord, RecordStatus},
};
use uuid::Uuid;

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Year overview: goals grouped by category with yearly progress.
  GoalBoard,
  /// One month's check-in: pending goals above, completed below.
  MonthCheckin,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Year being planned.
  pub year: i32,

  /// Month shown on the check-in screen, 1-12.
  pub month: u32,

  pub categories: Vec<Category>,
  pub goals: Vec<Goal>,

  /// All of this year's records — drives the board's progress labels.
  pub year_records: Vec<MonthlyRecord>,

  /// The active month's records — drives the check-in partition.
  pub month_records: Vec<MonthlyRecord>,

  /// Whether a retrospective was written for the active month.
  pub has_retrospective: bool,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* board goal list.
  pub board_cursor: usize,

  /// Cursor position within pending ++ completed on the check-in screen.
  pub month_cursor: usize,

  /// Numeric entry buffer; `Some` while the user is typing a value.
  pub numeric_input: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with empty data for (`year`, `month`).
  pub fn new(client: ApiClient, year: i32, month: u32) -> Self {
    Self {
      screen: Screen::GoalBoard,
      year,
      month,
      categories: Vec::new(),
      goals: Vec::new(),
      year_records: Vec::new(),
      month_records: Vec::new(),
      has_retrospective: false,
      filter: String::new(),
      filter_active: false,
      board_cursor: 0,
      month_cursor: 0,
      numeric_input: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch everything the two screens need.
  pub async fn load_all(&mut self) -> anyhow::Result<()> {
    self.status_msg = "불러오는 중…".into();

    let categories = self.client.list_categories().await;
    let goals = self.client.list_goals(self.year).await;
    let year_records = self.client.year_records(self.year).await;

    match (categories, goals, year_records) {
      (Ok(categories), Ok(goals), Ok(year_records)) => {
        self.categories = categories;
        self.goals = goals;
        self.year_records = year_records;
        self.board_cursor = 0;
        self.status_msg = String::new();
      }
      (Err(e), ..) | (_, Err(e), _) | (_, _, Err(e)) => {
        self.status_msg = format!("오류: {e}");
        return Err(e);
      }
    }

    self.reload_month().await
  }

  /// Re-fetch the active month's records and retrospective flag.
  pub async fn reload_month(&mut self) -> anyhow::Result<()> {
    match self.client.month_records(self.year, self.month).await {
      Ok(records) => self.month_records = records,
      Err(e) => {
        self.status_msg = format!("오류: {e}");
        return Err(e);
      }
    }
    self.has_retrospective = self
      .client
      .get_retrospective(self.year, self.month)
      .await
      .ok()
      .flatten()
      .is_some_and(|r| !r.content.is_empty());
    Ok(())
  }

  /// Refresh the yearly rows after a cell write so board labels stay true.
  async fn reload_year_records(&mut self) {
    if let Ok(records) = self.client.year_records(self.year).await {
      self.year_records = records;
    }
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// Board goals in (category position, goal position) order, fuzzy-filtered.
  pub fn board_goals(&self) -> Vec<&Goal> {
    let rank = |g: &Goal| {
      let category_rank = self
        .categories
        .iter()
        .find(|c| c.category_id == g.category_id)
        .map(|c| c.order_index)
        .unwrap_or(i64::MAX);
      (category_rank, g.order_index)
    };

    let mut goals: Vec<&Goal> = if self.filter.is_empty() {
      self.goals.iter().collect()
    } else {
      let matcher = SkimMatcherV2::default();
      self
        .goals
        .iter()
        .filter(|g| {
          let category_name = self
            .categories
            .iter()
            .find(|c| c.category_id == g.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or_default();
          matcher.fuzzy_match(&g.title, &self.filter).is_some()
            || matcher.fuzzy_match(category_name, &self.filter).is_some()
        })
        .collect()
    };

    goals.sort_by_key(|g| rank(g));
    goals
  }

  /// The check-in partition for the active month.
  pub fn partition(&self) -> MonthPartition {
    progress::partition_month(&self.goals, &self.month_records, &self.categories)
  }

  /// Pending ++ completed, the flat cursor space of the check-in screen.
  pub fn month_entries(&self) -> (Vec<Goal>, usize) {
    let split = self.partition();
    let pending_len = split.pending.len();
    let mut entries = split.pending;
    entries.extend(split.completed);
    (entries, pending_len)
  }

  /// The goal under the check-in cursor plus whether it is still pending.
  pub fn month_cursor_goal(&self) -> Option<(Goal, bool)> {
    let (entries, pending_len) = self.month_entries();
    entries
      .get(self.month_cursor)
      .map(|g| (g.clone(), self.month_cursor < pending_len))
  }

  /// Yearly standing for one goal.
  pub fn summary_for(&self, goal: &Goal) -> YearSummary {
    progress::year_summary(goal, &self.year_records)
  }

  /// This month's cell for one goal, if a row exists.
  pub fn month_record_for(&self, goal_id: Uuid) -> Option<&MonthlyRecord> {
    self.month_records.iter().find(|r| r.goal_id == goal_id)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn write_cell(&mut self, input: NewRecord) {
    match self.client.put_record(&input).await {
      Ok(_) => {
        self.status_msg = "저장됨".into();
        self.reload_month().await.ok();
        self.reload_year_records().await;
      }
      Err(e) => self.status_msg = format!("저장 실패: {e}"),
    }
  }

  async fn record_status(&mut self, goal_id: Uuid, status: RecordStatus) {
    let mut input = NewRecord::clear(goal_id, self.year, self.month);
    input.status = Some(status);
    self.write_cell(input).await;
  }

  async fn record_numeric(&mut self, goal_id: Uuid, value: Option<f64>) {
    let mut input = NewRecord::clear(goal_id, self.year, self.month);
    input.numeric_value = value;
    self.write_cell(input).await;
  }

  /// The "record again" control — reset the cell to absent.
  async fn clear_cell(&mut self, goal_id: Uuid) {
    match self.client.clear_record(goal_id, self.year, self.month).await {
      Ok(_) => {
        self.status_msg = "다시 입력할 수 있습니다".into();
        self.reload_month().await.ok();
        self.reload_year_records().await;
      }
      Err(e) => self.status_msg = format!("저장 실패: {e}"),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Numeric entry swallows everything until Enter / Esc.
    if self.numeric_input.is_some() {
      self.handle_numeric_key(key).await;
      return Ok(true);
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::GoalBoard => self.handle_board_key(key).await,
      Screen::MonthCheckin => self.handle_month_key(key).await,
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.board_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.board_cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.board_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.board_cursor = 0;
      }
      _ => {}
    }
  }

  async fn handle_board_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Switch to the check-in screen
      KeyCode::Tab | KeyCode::Enter => {
        self.screen = Screen::MonthCheckin;
        self.month_cursor = 0;
      }

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.board_goals().len();
        if len > 0 && self.board_cursor + 1 < len {
          self.board_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.board_cursor > 0 {
          self.board_cursor -= 1;
        }
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.board_cursor = 0;
      }

      // Reload
      KeyCode::Char('r') => {
        self.load_all().await.ok();
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_month_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Back to the board
      KeyCode::Tab | KeyCode::Esc => {
        self.screen = Screen::GoalBoard;
      }

      // Month navigation wraps within the year.
      KeyCode::Left | KeyCode::Char('[') => {
        self.month = if self.month > 1 { self.month - 1 } else { 12 };
        self.month_cursor = 0;
        self.reload_month().await.ok();
      }
      KeyCode::Right | KeyCode::Char(']') => {
        self.month = if self.month < 12 { self.month + 1 } else { 1 };
        self.month_cursor = 0;
        self.reload_month().await.ok();
      }

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let (entries, _) = self.month_entries();
        if !entries.is_empty() && self.month_cursor + 1 < entries.len() {
          self.month_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.month_cursor > 0 {
          self.month_cursor -= 1;
        }
      }

      // Record a boolean status on the selected pending goal.
      KeyCode::Char('s') => self.record_selected_status(RecordStatus::Success).await,
      KeyCode::Char('h') => self.record_selected_status(RecordStatus::Hold).await,
      KeyCode::Char('f') => self.record_selected_status(RecordStatus::Fail).await,

      // Open numeric entry on the selected pending numeric goal.
      KeyCode::Enter | KeyCode::Char('i') => {
        if let Some((goal, pending)) = self.month_cursor_goal()
          && pending
          && goal.kind == GoalKind::Numeric
        {
          self.numeric_input = Some(String::new());
        }
      }

      // "Record again": clear the selected completed goal's cell.
      KeyCode::Char('e') => {
        if let Some((goal, pending)) = self.month_cursor_goal()
          && !pending
        {
          self.clear_cell(goal.goal_id).await;
        }
      }

      _ => {}
    }
    Ok(true)
  }

  async fn record_selected_status(&mut self, status: RecordStatus) {
    if let Some((goal, pending)) = self.month_cursor_goal()
      && pending
      && goal.kind == GoalKind::Boolean
    {
      self.record_status(goal.goal_id, status).await;
    }
  }

  async fn handle_numeric_key(&mut self, key: KeyEvent) {
    let Some(buffer) = self.numeric_input.as_mut() else {
      return;
    };

    match key.code {
      KeyCode::Esc => {
        self.numeric_input = None;
      }
      KeyCode::Backspace => {
        buffer.pop();
      }
      // Digits and at most one decimal point.
      KeyCode::Char(c) if c.is_ascii_digit() => buffer.push(c),
      KeyCode::Char('.') if !buffer.contains('.') => buffer.push('.'),
      KeyCode::Enter => {
        let raw = buffer.clone();
        self.numeric_input = None;
        if let Some((goal, _)) = self.month_cursor_goal() {
          // An empty entry clears the cell.
          let value = raw.parse::<f64>().ok();
          self.record_numeric(goal.goal_id, value).await;
        }
      }
      _ => {}
    }
  }
}
