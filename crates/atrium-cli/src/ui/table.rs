//! Record table pane: left panel.

use atrium_table::{StatusFilter, export::Exportable};
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Paragraph, Row, Table, TableState},
};

use crate::app::TableView;

/// Render the current page of `view` into `area`.
pub fn draw<R: Exportable>(f: &mut Frame, area: Rect, view: &TableView<R>) {
  let state = view.state();
  let page = state.current_page();

  let filter = match state.status_filter {
    StatusFilter::All => String::new(),
    StatusFilter::Only(_) => format!(" · {}", state.status_filter.label()),
  };
  let title = format!(
    " {} ({}/{}){filter} ",
    R::KIND.title(),
    page.total_items,
    state.records.len(),
  );
  let footer = format!(
    " page {}/{} ",
    page.number,
    page.total_pages.max(1),
  );

  let block = Block::bordered()
    .title(title)
    .title_bottom(Line::from(footer).right_aligned())
    .border_style(Style::default().fg(Color::DarkGray));
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  // Search bar on the last inner line while searching or filtered.
  if (view.searching || !state.query.is_empty()) && inner.height > 2 {
    let search_area = Rect { y: inner.y + inner.height - 1, height: 1, ..inner };
    inner.height -= 1;

    let text = if view.searching {
      format!("/{}_", state.query)
    } else {
      format!("/{}", state.query)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  if page.items.is_empty() {
    let empty = if state.records.is_empty() {
      "Nothing here yet."
    } else {
      "No records match."
    };
    f.render_widget(
      Paragraph::new(empty).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let header = Row::new(R::PDF_COLUMNS.iter().map(|c| c.header))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
  let rows: Vec<Row> = page.items.iter().map(|r| Row::new(r.pdf_row())).collect();
  let widths = R::PDF_COLUMNS.iter().map(|c| Constraint::Fill(c.width));

  let mut cursor = TableState::default();
  cursor.select(Some(view.cursor));

  f.render_stateful_widget(
    Table::new(rows, widths)
      .header(header)
      .column_spacing(1)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    inner,
    &mut cursor,
  );
}
