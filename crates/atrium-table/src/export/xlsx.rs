//! Single-sheet workbooks via `rust_xlsxwriter`.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::ExportTable;

/// Excel caps sheet names at 31 characters.
const SHEET_NAME_MAX: usize = 31;

pub(super) fn render(table: &ExportTable) -> Result<Vec<u8>, XlsxError> {
  let mut workbook = Workbook::new();
  let header = Format::new().set_bold();

  let sheet = workbook.add_worksheet();
  let name: String = table.title.chars().take(SHEET_NAME_MAX).collect();
  sheet.set_name(name)?;

  for (col, title) in table.headers.iter().enumerate() {
    sheet.write_string_with_format(0, col as u16, *title, &header)?;
  }
  for (row, cells) in table.rows.iter().enumerate() {
    for (col, value) in cells.iter().enumerate() {
      sheet.write_string(row as u32 + 1, col as u16, value)?;
    }
  }
  sheet.set_freeze_panes(1, 0)?;
  sheet.autofit();

  workbook.save_to_buffer()
}
