//! Monthly check-in — pending goals above, completed records below.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use telos_core::{
  goal::{Goal, GoalKind},
  progress,
};

use crate::{
  app::App,
  ui::{format_amount, status_label},
};

/// Render the check-in screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let split = app.partition();
  let pending_len = split.pending.len();

  let retro_mark = if app.has_retrospective { "회고 ✓" } else { "회고 없음" };
  let title = format!(" {}월 점검 — {retro_mark} ", app.month);

  let outer = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = outer.inner(area);
  f.render_widget(outer, area);

  // Reserve one line for the numeric entry prompt when it is open.
  let (list_area, input_area) = if app.numeric_input.is_some() && inner.height > 2 {
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(0), Constraint::Length(1)])
      .split(inner);
    (rows[0], Some(rows[1]))
  } else {
    (inner, None)
  };

  let halves = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
    .split(list_area);

  draw_pending(f, halves[0], app, &split.pending);
  draw_completed(f, halves[1], app, &split.completed, pending_len);

  if let (Some(input_area), Some(buffer)) = (input_area, &app.numeric_input) {
    let unit = app
      .month_cursor_goal()
      .and_then(|(g, _)| g.unit)
      .unwrap_or_default();
    f.render_widget(
      Paragraph::new(format!("기록값: {buffer}_ {unit}"))
        .style(Style::default().fg(Color::Yellow)),
      input_area,
    );
  }
}

// ─── Pending ─────────────────────────────────────────────────────────────────

fn draw_pending(f: &mut Frame, area: Rect, app: &App, pending: &[Goal]) {
  let block = Block::default()
    .title(format!(" 월간 점검 ({}) ", pending.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  let items: Vec<ListItem> = pending
    .iter()
    .enumerate()
    .map(|(i, goal)| {
      let is_cursor = i == app.month_cursor;
      let style = cursor_style(is_cursor);

      let hint = match goal.kind {
        GoalKind::Boolean => "s/h/f".to_owned(),
        GoalKind::Numeric => match goal.target_value {
          Some(target) => format!(
            "목표 {}{}",
            format_amount(target),
            goal.unit.as_deref().unwrap_or_default(),
          ),
          None => "Enter 입력".to_owned(),
        },
      };

      ListItem::new(Line::from(vec![
        Span::styled(format!(" {} ", goal.emoji), style),
        Span::styled(goal.title.clone(), style),
        Span::raw("  "),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
      ]))
    })
    .collect();

  let inner = block.inner(area);
  f.render_widget(block, area);

  if items.is_empty() {
    f.render_widget(
      Paragraph::new(Span::styled(
        "이번 달은 모두 기록했습니다.",
        Style::default().fg(Color::DarkGray),
      )),
      inner,
    );
    return;
  }

  let mut state = ListState::default();
  state.select((app.month_cursor < pending.len()).then_some(app.month_cursor));
  f.render_stateful_widget(
    List::new(items).highlight_symbol(""),
    inner,
    &mut state,
  );
}

// ─── Completed ───────────────────────────────────────────────────────────────

fn draw_completed(
  f: &mut Frame,
  area: Rect,
  app: &App,
  completed: &[Goal],
  pending_len: usize,
) {
  let block = Block::default()
    .title(format!(" 기록 완료 ({}) ", completed.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Green));

  let items: Vec<ListItem> = completed
    .iter()
    .enumerate()
    .map(|(i, goal)| {
      let is_cursor = pending_len + i == app.month_cursor;
      let style = cursor_style(is_cursor);

      let record = app.month_record_for(goal.goal_id);
      let (value, color) = match goal.kind {
        GoalKind::Boolean => match progress::effective_status(record) {
          Some(status) => {
            let (label, color) = status_label(status);
            (label.to_owned(), color)
          }
          None => ("—".to_owned(), Color::DarkGray),
        },
        GoalKind::Numeric => (
          format!(
            "{}{}",
            record
              .and_then(|r| r.numeric_value)
              .map(format_amount)
              .unwrap_or_else(|| "—".to_owned()),
            goal.unit.as_deref().unwrap_or_default(),
          ),
          Color::Cyan,
        ),
      };

      ListItem::new(Line::from(vec![
        Span::styled(format!(" {} ", goal.emoji), style),
        Span::styled(goal.title.clone(), style),
        Span::raw("  "),
        Span::styled(
          value,
          if is_cursor { style } else { Style::default().fg(color) },
        ),
      ]))
    })
    .collect();

  let inner = block.inner(area);
  f.render_widget(block, area);

  if items.is_empty() {
    f.render_widget(
      Paragraph::new(Span::styled(
        "아직 기록이 없습니다.",
        Style::default().fg(Color::DarkGray),
      )),
      inner,
    );
    return;
  }

  let mut state = ListState::default();
  let selected = app
    .month_cursor
    .checked_sub(pending_len)
    .filter(|i| *i < completed.len());
  state.select(selected);
  f.render_stateful_widget(
    List::new(items).highlight_symbol(""),
    inner,
    &mut state,
  );
}

fn cursor_style(is_cursor: bool) -> Style {
  if is_cursor {
    Style::default()
      .bg(Color::Blue)
      .fg(Color::White)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default()
  }
}
