//! Workbook parsing for payroll uploads (xlsx, xls, xlsb, ods).
//!
//! Only the first sheet is read. The row at absolute index `header_rows`
//! holds the column labels; everything above it is title text.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::debug;

use super::error::PayrollError;
use super::types::{CellValue, RawRow};

/// Parses the first sheet of `bytes` into labeled rows.
///
/// Blank rows are dropped, empty cells are omitted, and cells under an
/// unlabeled column are ignored.
///
/// # Errors
///
/// Returns `PayrollError::UnreadableWorkbook` if the bytes are not a
/// workbook and `PayrollError::NoSheets` if it has no worksheet.
pub fn read_rows(bytes: &[u8], header_rows: usize) -> Result<Vec<RawRow>, PayrollError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| PayrollError::UnreadableWorkbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(PayrollError::NoSheets)?
        .map_err(|e| PayrollError::UnreadableWorkbook(e.to_string()))?;

    // Range start offset (data may not begin at A1)
    let (start_row, _) = range.start().unwrap_or((0, 0));
    let start_row = start_row as usize;
    if start_row > header_rows {
        // Label row is blank, so no cell can be keyed.
        debug!(start_row, header_rows, "Sheet begins below the label row");
        return Ok(Vec::new());
    }
    let skip = header_rows - start_row;

    let mut lines = range.rows().skip(skip);
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };

    let labels: Vec<Option<String>> = header.iter().map(header_label).collect();
    debug!(
        columns = ?labels.iter().flatten().collect::<Vec<_>>(),
        "Detected workbook columns"
    );

    let rows = lines
        .map(|line| {
            let mut row = RawRow::new();
            for (label, cell) in labels.iter().zip(line) {
                if let (Some(label), Some(value)) = (label, cell_value(cell)) {
                    row.insert(label.clone(), value);
                }
            }
            row
        })
        .filter(|row| !row.is_empty())
        .collect();

    Ok(rows)
}

fn header_label(cell: &Data) -> Option<String> {
    let label = cell.to_string();
    if label.trim().is_empty() {
        None
    } else {
        Some(label)
    }
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(CellValue::Text(s.clone()))
            }
        }
        Data::Float(f) => Decimal::from_f64(*f).map(CellValue::Number),
        Data::Int(i) => Some(CellValue::Number(Decimal::from(*i))),
        Data::Bool(b) => Some(CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string())),
        Data::DateTime(dt) => Decimal::from_f64(dt.as_f64()).map(CellValue::Number),
    }
}
