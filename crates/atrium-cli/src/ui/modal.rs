//! Popups drawn over the body: delete confirmation, edit form, load error.

use atrium_core::{EditableFields, FieldErrors, RecordKind};
use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Clear, Paragraph, Wrap},
};

/// A `width` × `height` rectangle centred in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
    .flex(Flex::Center)
    .areas(area);
  let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
    .flex(Flex::Center)
    .areas(row);
  rect
}

pub fn draw_confirm(f: &mut Frame, area: Rect, kind: RecordKind, id: &str) {
  let rect = centered(area, 52, 5);
  let block = Block::bordered()
    .title(" Delete ")
    .border_style(Style::default().fg(Color::Red));
  let text = vec![
    Line::from(format!("Permanently delete {kind} {id}?")),
    Line::from(""),
    Line::from(Span::styled("[y] delete   [n] cancel", Style::default().fg(Color::DarkGray))),
  ];
  f.render_widget(Clear, rect);
  f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), rect);
}

/// The edit form: one labelled line per field, the focused field
/// highlighted, and any validation message under its field.
pub fn draw_edit<F: EditableFields>(
  f: &mut Frame,
  area: Rect,
  draft: &F,
  errors: &FieldErrors,
  focused: usize,
) {
  let mut lines = Vec::new();
  for (i, spec) in F::SPECS.iter().enumerate() {
    let value = draft.get(spec.name).unwrap_or_default();
    let marker = if spec.required { "*" } else { " " };
    let label_style = if i == focused {
      Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Cyan)
    };
    let mut value_lines = value.split('\n');
    let first = value_lines.next().unwrap_or_default();
    let cursor = if i == focused && !spec.multiline { "_" } else { "" };
    lines.push(Line::from(vec![
      Span::styled(format!("{:<12}", format!("{}{marker}", spec.label)), label_style),
      Span::raw(format!(" {first}{cursor}")),
    ]));
    for more in value_lines {
      lines.push(Line::from(format!("{:13}{more}", "")));
    }
    if let Some(message) = errors.get(spec.name) {
      lines.push(Line::from(Span::styled(
        format!("{:13}{} {message}", "", spec.label),
        Style::default().fg(Color::Red),
      )));
    }
  }

  let height = (lines.len() as u16).saturating_add(2);
  let rect = centered(area, area.width.saturating_sub(8).max(40), height);
  let block = Block::bordered()
    .title(" Edit ")
    .border_style(Style::default().fg(Color::Yellow));
  f.render_widget(Clear, rect);
  f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), rect);
}

/// Replaces the table when the initial load failed.
pub fn draw_load_error(f: &mut Frame, area: Rect, title: &str, message: &str) {
  let block = Block::bordered()
    .title(format!(" {title} "))
    .border_style(Style::default().fg(Color::Red));
  let text = vec![
    Line::from(Span::styled(
      "Could not load records",
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from(message.to_owned()),
    Line::from(""),
    Line::from(Span::styled("Press r to retry.", Style::default().fg(Color::DarkGray))),
  ];
  f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}
