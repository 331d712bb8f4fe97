//! Record detail pane: right panel.

use atrium_core::{AnyRecord, CareerApplication, ContactSubmission, Subscriber};
use chrono::{DateTime, Local, Utc};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph, Wrap},
};

/// Render `record` into `area`, or a hint when nothing is selected.
pub fn draw(f: &mut Frame, area: Rect, record: Option<&AnyRecord>) {
  let block = Block::bordered()
    .title(" Detail ")
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(record) = record else {
    f.render_widget(
      Paragraph::new("No record selected.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let lines = match record {
    AnyRecord::Contact(c) => contact_lines(c),
    AnyRecord::Career(a) => career_lines(a),
    AnyRecord::Subscriber(s) => subscriber_lines(s),
  };
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn contact_lines(c: &ContactSubmission) -> Vec<Line<'static>> {
  let mut lines = vec![
    field("Name", &c.name),
    field("Email", &c.email),
    field("Phone", c.phone.as_deref().unwrap_or("—")),
    field("Company", c.company.as_deref().unwrap_or("—")),
    field("Subject", &c.subject),
    field("Status", &c.status.to_string()),
    field("Received", &local(c.created_at)),
  ];
  body(&mut lines, "Message", &c.message);
  lines
}

fn career_lines(a: &CareerApplication) -> Vec<Line<'static>> {
  let resume = match &a.resume {
    Some(r) => format!("{} ({} KiB)  [R] download", r.file_name, r.size.div_ceil(1024)),
    None => "—".to_owned(),
  };
  let mut lines = vec![
    field("Name", &a.name),
    field("Email", &a.email),
    field("Phone", a.phone.as_deref().unwrap_or("—")),
    field("Position", &a.position),
    field("Experience", a.experience.as_deref().unwrap_or("—")),
    field("Status", &a.status.to_string()),
    field("Applied", &local(a.created_at)),
    field("Resume", &resume),
  ];
  if let Some(letter) = &a.cover_letter {
    body(&mut lines, "Cover letter", letter);
  }
  lines
}

fn subscriber_lines(s: &Subscriber) -> Vec<Line<'static>> {
  vec![
    field("Email", &s.email),
    field("Status", &s.status.to_string()),
    field("Since", &local(s.created_at)),
  ]
}

fn field(label: &str, value: &str) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{label:<12}"),
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ),
    Span::raw(value.to_owned()),
  ])
}

fn body(lines: &mut Vec<Line<'static>>, label: &str, text: &str) {
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    label.to_owned(),
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
  )));
  lines.extend(text.lines().map(|l| Line::from(l.to_owned())));
}

fn local(at: DateTime<Utc>) -> String {
  at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
