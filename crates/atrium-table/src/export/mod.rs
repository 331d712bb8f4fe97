//! PDF and spreadsheet exports of the filtered records.
//!
//! Both formats render the same [`ExportTable`]; the PDF uses a narrower
//! column set so rows fit a landscape page.

mod columns;
mod pdf;
mod xlsx;

use atrium_core::RecordKind;
use chrono::{DateTime, Utc};

pub use self::columns::{Column, Exportable};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
  Pdf,
  Xlsx,
}

impl ExportFormat {
  pub fn extension(self) -> &'static str {
    match self {
      Self::Pdf => "pdf",
      Self::Xlsx => "xlsx",
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
  #[error("failed to render PDF: {0}")]
  Pdf(String),
  #[error("failed to render spreadsheet: {0}")]
  Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// A rendered document, ready to be written out.
#[derive(Debug, Clone)]
pub struct ExportedFile {
  pub file_name: String,
  pub bytes:     Vec<u8>,
  /// Number of data rows, excluding headers.
  pub rows:      usize,
}

/// Headers and string cells, the common input of both renderers.
#[derive(Debug, Clone)]
pub struct ExportTable {
  pub title:        String,
  pub generated_at: DateTime<Utc>,
  pub headers:      Vec<&'static str>,
  /// Relative column widths, one per header.
  pub widths:       Vec<u16>,
  pub rows:         Vec<Vec<String>>,
}

/// `<stem>.<ext>`, e.g. `career-applications.xlsx`.
pub fn file_name(kind: RecordKind, format: ExportFormat) -> String {
  format!("{}.{}", kind.export_stem(), format.extension())
}

/// Render `records` in `format`. Every record becomes exactly one row.
pub fn export<R: Exportable>(
  records: &[&R],
  format: ExportFormat,
  generated_at: DateTime<Utc>,
) -> Result<ExportedFile, ExportError> {
  let table = match format {
    ExportFormat::Pdf => ExportTable {
      title: R::KIND.title().to_owned(),
      generated_at,
      headers: R::PDF_COLUMNS.iter().map(|c| c.header).collect(),
      widths: R::PDF_COLUMNS.iter().map(|c| c.width).collect(),
      rows: records.iter().map(|r| r.pdf_row()).collect(),
    },
    ExportFormat::Xlsx => ExportTable {
      title: R::KIND.title().to_owned(),
      generated_at,
      headers: R::SHEET_HEADERS.to_vec(),
      widths: vec![1; R::SHEET_HEADERS.len()],
      rows: records.iter().map(|r| r.sheet_row()).collect(),
    },
  };

  let bytes = match format {
    ExportFormat::Pdf => pdf::render(&table)?,
    ExportFormat::Xlsx => xlsx::render(&table)?,
  };
  tracing::info!(kind = %R::KIND, %format, rows = table.rows.len(), "exported records");

  Ok(ExportedFile {
    file_name: file_name(R::KIND, format),
    bytes,
    rows: table.rows.len(),
  })
}
