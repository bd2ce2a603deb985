//! XLSX encoder

use rust_xlsxwriter::Workbook;

use super::rows::split_rows;
use crate::{Error, Result};

const SHEET_NAME: &str = "Sheet";

/// Write one row per line and one string cell per comma-separated value,
/// starting at the top-left cell of a single sheet.
pub fn render(content: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(Error::generation)?;

    for (row_index, cells) in split_rows(content).iter().enumerate() {
        let row = u32::try_from(row_index)
            .map_err(|_| Error::Generation(format!("Row {} is out of range", row_index + 1)))?;
        for (col_index, value) in cells.iter().enumerate() {
            let col = u16::try_from(col_index).map_err(|_| {
                Error::Generation(format!("Column {} is out of range", col_index + 1))
            })?;
            sheet
                .write_string(row, col, value.as_str())
                .map_err(Error::generation)?;
        }
    }

    workbook.save_to_buffer().map_err(Error::generation)
}
