//! Grid extraction

use crate::types::{CellValue, Grid};
use calamine::{Data, Range};

/// Read headers and the data rectangle from a worksheet range
///
/// `header_row` and `data_row` are 1-based sheet rows. Columns run from A
/// through the highest occupied column and data rows through the highest
/// occupied row, both taken from the range's end bounds. Cells are addressed
/// absolutely, so a used range that does not start at A1 is handled.
pub fn extract(range: &Range<Data>, header_row: u32, data_row: u32) -> Grid {
    let (last_row, last_col) = match range.end() {
        Some(end) => end,
        None => return Grid::default(),
    };

    let cell = |row: u32, col: u32| -> CellValue {
        range
            .get_value((row, col))
            .map(CellValue::from)
            .unwrap_or(CellValue::Null)
    };

    let header_idx = header_row.saturating_sub(1);
    let headers: Vec<String> = (0..=last_col)
        .map(|col| cell(header_idx, col).to_string())
        .collect();

    let rows: Vec<Vec<CellValue>> = (data_row.saturating_sub(1)..=last_row)
        .map(|row| (0..=last_col).map(|col| cell(row, col)).collect())
        .collect();

    tracing::debug!(
        columns = headers.len(),
        rows = rows.len(),
        "extracted grid"
    );

    Grid { headers, rows }
}
