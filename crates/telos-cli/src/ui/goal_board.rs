//! Year overview — goals grouped by category with yearly progress labels.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};
use uuid::Uuid;

use crate::{
  app::App,
  ui::{category_color, summary_label},
};

/// Render the goal board into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let goals = app.board_goals();
  let total = app.goals.len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" {}년 목표 ({}/{}) ", app.year, goals.len(), total)
  } else {
    format!(" {}년 목표 ({}) ", app.year, total)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  // Build list items: a header line whenever the category changes, then one
  // line per goal. The cursor only ever lands on goal lines.
  let mut items: Vec<ListItem> = Vec::new();
  let mut selected_item: Option<usize> = None;
  let mut current_category: Option<Uuid> = None;

  for (goal_index, goal) in goals.iter().enumerate() {
    if current_category != Some(goal.category_id) {
      current_category = Some(goal.category_id);
      let (name, position) = app
        .categories
        .iter()
        .enumerate()
        .find(|(_, c)| c.category_id == goal.category_id)
        .map(|(i, c)| (c.name.as_str(), i))
        .unwrap_or(("미분류", usize::MAX));
      let color = if position == usize::MAX {
        Color::DarkGray
      } else {
        category_color(position)
      };
      items.push(ListItem::new(Line::from(Span::styled(
        format!("● {name}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ))));
    }

    let is_cursor = goal_index == app.board_cursor;
    if is_cursor {
      selected_item = Some(items.len());
    }

    let style = if is_cursor {
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };

    let (label, label_color) = summary_label(&app.summary_for(goal));
    items.push(ListItem::new(Line::from(vec![
      Span::styled(format!("  {} ", goal.emoji), style),
      Span::styled(goal.title.clone(), style),
      Span::raw("  "),
      Span::styled(
        label,
        if is_cursor {
          style
        } else {
          Style::default().fg(label_color)
        },
      ),
    ])));
  }

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // If filter is active or set, show a filter bar at the bottom of the inner area.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      ratatui::widgets::Paragraph::new(filter_text)
        .style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  // Scrollable list with cursor tracking.
  let mut state = ListState::default();
  state.select(selected_item);

  f.render_stateful_widget(
    List::new(items).highlight_symbol(""),
    inner_area,
    &mut state,
  );
}
