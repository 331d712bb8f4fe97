//! Landscape A4 table pages built directly with `lopdf`.

use lopdf::{
  Document, Object, Stream,
  content::{Content, Operation},
  dictionary,
};

use super::{ExportError, ExportTable};

const PAGE_WIDTH: i64 = 842;
const PAGE_HEIGHT: i64 = 595;
const MARGIN: i64 = 40;
const ROW_HEIGHT: i64 = 16;
const TABLE_TOP: i64 = PAGE_HEIGHT - 90;
/// Data rows per page, below the header row.
pub(super) const ROWS_PER_PAGE: usize = ((TABLE_TOP - MARGIN) / ROW_HEIGHT) as usize - 1;

const TITLE_SIZE: i64 = 16;
const TEXT_SIZE: i64 = 8;
/// Rough Helvetica advance at [`TEXT_SIZE`], in points per character.
const CHAR_WIDTH: f64 = 4.4;

pub(super) fn render(table: &ExportTable) -> Result<Vec<u8>, ExportError> {
  let mut doc = Document::with_version("1.5");
  let pages_id = doc.new_object_id();

  let font_id = doc.add_object(dictionary! {
    "Type" => "Font",
    "Subtype" => "Type1",
    "BaseFont" => "Helvetica",
  });
  let bold_id = doc.add_object(dictionary! {
    "Type" => "Font",
    "Subtype" => "Type1",
    "BaseFont" => "Helvetica-Bold",
  });
  let resources_id = doc.add_object(dictionary! {
    "Font" => dictionary! {
      "F1" => font_id,
      "F2" => bold_id,
    },
  });

  let columns = column_layout(&table.widths);
  let chunks: Vec<&[Vec<String>]> = if table.rows.is_empty() {
    vec![&[]]
  } else {
    table.rows.chunks(ROWS_PER_PAGE).collect()
  };
  let page_total = chunks.len();

  let mut kids = Vec::with_capacity(page_total);
  for (index, rows) in chunks.into_iter().enumerate() {
    let content = page_content(table, &columns, rows, index + 1, page_total);
    let encoded = content.encode().map_err(|e| ExportError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    let page_id = doc.add_object(dictionary! {
      "Type" => "Page",
      "Parent" => pages_id,
      "Contents" => content_id,
    });
    kids.push(Object::Reference(page_id));
  }

  let pages = dictionary! {
    "Type" => "Pages",
    "Kids" => kids,
    "Count" => Object::Integer(page_total as i64),
    "Resources" => resources_id,
    "MediaBox" => vec![
      Object::Integer(0),
      Object::Integer(0),
      Object::Integer(PAGE_WIDTH),
      Object::Integer(PAGE_HEIGHT),
    ],
  };
  doc.objects.insert(pages_id, Object::Dictionary(pages));

  let catalog_id = doc.add_object(dictionary! {
    "Type" => "Catalog",
    "Pages" => pages_id,
  });
  doc.trailer.set("Root", catalog_id);
  doc.compress();

  let mut bytes = Vec::new();
  doc.save_to(&mut bytes).map_err(|e| ExportError::Pdf(e.to_string()))?;
  Ok(bytes)
}

/// Left edge and character budget of each column.
fn column_layout(widths: &[u16]) -> Vec<(i64, usize)> {
  let usable = (PAGE_WIDTH - 2 * MARGIN) as f64;
  let total: f64 = widths.iter().map(|w| f64::from(*w)).sum::<f64>().max(1.0);
  let mut x = MARGIN as f64;
  widths
    .iter()
    .map(|w| {
      let width = usable * f64::from(*w) / total;
      let left = x;
      x += width;
      (left as i64, ((width - 6.0) / CHAR_WIDTH).max(1.0) as usize)
    })
    .collect()
}

fn page_content(
  table: &ExportTable,
  columns: &[(i64, usize)],
  rows: &[Vec<String>],
  page: usize,
  page_total: usize,
) -> Content {
  let mut ops = Vec::new();

  text(&mut ops, "F2", TITLE_SIZE, MARGIN, PAGE_HEIGHT - MARGIN - 10, &table.title);
  let generated = format!(
    "Generated {}  -  {} records",
    table.generated_at.format("%Y-%m-%d %H:%M UTC"),
    table.rows.len()
  );
  text(&mut ops, "F1", TEXT_SIZE + 1, MARGIN, PAGE_HEIGHT - MARGIN - 28, &generated);

  let mut y = TABLE_TOP;
  for ((x, budget), header) in columns.iter().zip(&table.headers) {
    text(&mut ops, "F2", TEXT_SIZE, *x, y, &fit(header, *budget));
  }
  rule(&mut ops, y - 4);

  for row in rows {
    y -= ROW_HEIGHT;
    for ((x, budget), cell) in columns.iter().zip(row) {
      text(&mut ops, "F1", TEXT_SIZE, *x, y, &fit(cell, *budget));
    }
  }

  let footer = format!("Page {page} of {page_total}");
  text(&mut ops, "F1", TEXT_SIZE, PAGE_WIDTH - MARGIN - 60, MARGIN / 2, &footer);

  Content { operations: ops }
}

fn text(ops: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, s: &str) {
  ops.push(Operation::new("BT", vec![]));
  ops.push(Operation::new("Tf", vec![
    Object::Name(font.as_bytes().to_vec()),
    Object::Integer(size),
  ]));
  ops.push(Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]));
  ops.push(Operation::new("Tj", vec![Object::string_literal(s)]));
  ops.push(Operation::new("ET", vec![]));
}

fn rule(ops: &mut Vec<Operation>, y: i64) {
  ops.push(Operation::new("m", vec![Object::Integer(MARGIN), Object::Integer(y)]));
  ops.push(Operation::new("l", vec![
    Object::Integer(PAGE_WIDTH - MARGIN),
    Object::Integer(y),
  ]));
  ops.push(Operation::new("S", vec![]));
}

/// Flatten to single-line ASCII and truncate to `budget` characters.
fn fit(s: &str, budget: usize) -> String {
  let clean: String = s
    .chars()
    .map(|c| match c {
      '\n' | '\r' | '\t' => ' ',
      c if c.is_ascii() && !c.is_ascii_control() => c,
      _ => '?',
    })
    .collect();
  if clean.chars().count() <= budget {
    clean
  } else {
    let keep = budget.saturating_sub(3);
    format!("{}...", &clean[..keep])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fit_truncates_and_flattens() {
    assert_eq!(fit("short", 10), "short");
    assert_eq!(fit("a rather long value", 10), "a rathe...");
    assert_eq!(fit("two\nlines", 20), "two lines");
    assert_eq!(fit("caf\u{e9}", 20), "caf?");
  }

  #[test]
  fn columns_span_the_page() {
    let layout = column_layout(&[1, 1, 2]);
    assert_eq!(layout[0].0, MARGIN);
    assert!(layout[1].0 > layout[0].0);
    assert!(layout[2].0 < PAGE_WIDTH - MARGIN);
  }
}
