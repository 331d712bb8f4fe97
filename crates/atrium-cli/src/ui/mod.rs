//! TUI rendering: orchestrates all panes.

pub mod detail;
pub mod modal;
pub mod table;

use atrium_table::{LoadState, Modal, NoticeLevel, export::Exportable};
use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph, Tabs},
};

use crate::app::{App, Tab, TableView};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  match app.tab {
    Tab::Contacts => draw_view(f, rows[1], rows[2], &app.contacts),
    Tab::Careers => draw_view(f, rows[1], rows[2], &app.careers),
    Tab::Subscribers => draw_view(f, rows[1], rows[2], &app.subscribers),
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Min(0), Constraint::Length(12)])
    .split(area);

  let titles: Vec<Line> = Tab::ALL
    .iter()
    .map(|t| Line::from(format!(" {} ", t.kind().title())))
    .collect();
  let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);

  let tabs = Tabs::new(titles)
    .select(selected)
    .style(Style::default().fg(Color::Gray).bg(Color::DarkGray))
    .highlight_style(
      Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    )
    .divider("│");
  f.render_widget(tabs, cols[0]);

  let date = Local::now().format("%Y-%m-%d").to_string();
  f.render_widget(
    Paragraph::new(format!("{date} "))
      .style(Style::default().fg(Color::Gray).bg(Color::DarkGray))
      .right_aligned(),
    cols[1],
  );
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_view<R: Exportable>(f: &mut Frame, body: Rect, status: Rect, view: &TableView<R>) {
  let state = view.state();

  match &state.load {
    LoadState::Failed(message) => modal::draw_load_error(f, body, R::KIND.title(), message),
    LoadState::Idle | LoadState::Loading => {
      let block = Block::bordered()
        .title(format!(" {} ", R::KIND.title()))
        .border_style(Style::default().fg(Color::DarkGray));
      let inner = block.inner(body);
      f.render_widget(block, body);
      f.render_widget(
        Paragraph::new("Loading…").style(Style::default().fg(Color::DarkGray)),
        inner,
      );
    }
    LoadState::Ready => {
      let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(body);
      table::draw(f, cols[0], view);
      detail::draw(f, cols[1], view.selected().map(|r| r.clone().into_any()).as_ref());
    }
  }

  match &state.modal {
    Modal::None => {}
    Modal::ConfirmDelete { id } => modal::draw_confirm(f, body, R::KIND, id),
    Modal::Edit { draft, errors, .. } => {
      modal::draw_edit(f, body, draft, errors, view.edit_field);
    }
  }

  draw_status(f, status, view);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<R: Exportable>(f: &mut Frame, area: Rect, view: &TableView<R>) {
  let state = view.state();

  let (mode_label, hints) = match &state.modal {
    Modal::ConfirmDelete { .. } => ("DELETE", "y confirm  n cancel"),
    Modal::Edit { .. } => (
      "EDIT",
      "Tab/↑↓ field  Enter save  Ctrl-S save  Esc cancel",
    ),
    Modal::None if view.searching => ("SEARCH", "Type to filter  Enter keep  Esc clear"),
    Modal::None if matches!(state.load, LoadState::Failed(_)) => ("ERROR", "r retry  Tab next  q quit"),
    Modal::None if R::KIND == atrium_core::RecordKind::Career => (
      "NORMAL",
      "jk move  np page  / search  f filter  s status  e edit  d delete  x xlsx  P pdf  R resume  Tab next  q quit",
    ),
    Modal::None if !R::KIND.supports_update() => (
      "NORMAL",
      "jk move  np page  / search  f filter  d delete  x xlsx  P pdf  Tab next  q quit",
    ),
    Modal::None => (
      "NORMAL",
      "jk move  np page  / search  f filter  s status  e edit  d delete  x xlsx  P pdf  Tab next  q quit",
    ),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let message_span = match &state.notice {
    Some(n) => Span::styled(
      format!("  {}", n.message),
      Style::default().fg(match n.level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
      }),
    ),
    None => Span::styled(format!("  {hints}"), Style::default().fg(Color::DarkGray)),
  };

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, message_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
