//! TUI rendering — orchestrates all panes.

pub mod goal_board;
pub mod month_view;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use telos_core::{
  progress::{ProgressBand, YearSummary},
  record::RecordStatus,
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::GoalBoard => goal_board::draw(f, rows[1], app),
    Screen::MonthCheckin => month_view::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    format!(" telos {}  [Tab] 화면 전환  [q] 종료", app.year),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = if app.numeric_input.is_some() {
    ("INPUT", "숫자 입력  Enter 저장  Esc 취소")
  } else if app.filter_active {
    ("SEARCH", "입력해서 거르기  Esc 취소  Enter 확정")
  } else {
    match app.screen {
      Screen::GoalBoard => (
        "GOALS",
        "↑↓/jk 이동  / 검색  r 새로고침  Tab 월간 점검  q 종료",
      ),
      Screen::MonthCheckin => (
        "CHECKIN",
        "←→ 월 이동  s 달성  h 보류  f 실패  Enter 숫자 기록  e 다시 입력  Tab 목표  q 종료",
      ),
    }
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared label helpers ─────────────────────────────────────────────────────

/// Display color for a category by its board position. The stored color token
/// belongs to the web client's palette and is never parsed here.
pub(crate) fn category_color(position: usize) -> Color {
  const PALETTE: &[Color] = &[
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
  ];
  PALETTE[position % PALETTE.len()]
}

pub(crate) fn status_label(status: RecordStatus) -> (&'static str, Color) {
  match status {
    RecordStatus::Success => ("달성", Color::Green),
    RecordStatus::Fail => ("실패", Color::Red),
    RecordStatus::Hold => ("보류", Color::Yellow),
  }
}

/// Render a yearly summary as a status word, a percentage, or a raw total
/// with the unit appended.
pub(crate) fn summary_label(summary: &YearSummary) -> (String, Color) {
  match summary {
    YearSummary::NoData => ("기록 없음".to_owned(), Color::DarkGray),
    YearSummary::Status { status } => {
      let (label, color) = status_label(*status);
      (label.to_owned(), color)
    }
    YearSummary::Percent { percent, band } => {
      let color = match band {
        ProgressBand::Complete => Color::Green,
        ProgressBand::OnTrack => Color::Cyan,
        ProgressBand::Behind => Color::Yellow,
      };
      (format!("{percent}%"), color)
    }
    YearSummary::Total { sum, unit } => (
      format!("{}{}", format_amount(*sum), unit.as_deref().unwrap_or_default()),
      Color::Cyan,
    ),
  }
}

/// Print a value without a trailing `.0` for whole numbers.
pub(crate) fn format_amount(value: f64) -> String {
  if value.fract() == 0.0 {
    format!("{}", value as i64)
  } else {
    format!("{value}")
  }
}
