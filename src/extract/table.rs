//! Tabular uploads (`.csv`, `.xlsx`, tab-separated)
//!
//! Every format is first flattened into rows of string cells, then a single
//! column is chosen by header name.

use crate::error::{Error, Result};
use crate::types::IdentifierList;
use calamine::{Reader, Xlsx};
use std::io::Cursor;
use tracing::debug;

/// Preferred identifier column header
pub const SERIES_INSTANCE_UID: &str = "SeriesInstanceUID";

/// Alternate identifier column header, as used by NBIA search exports
pub const SERIES_UID: &str = "Series UID";

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Rows of stringified cells, first row possibly a header
pub type Rows = Vec<Vec<String>>;

/// Read a delimited text table; ragged rows are allowed
pub fn read_delimited(bytes: &[u8], delimiter: u8) -> Result<Rows> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(ToString::to_string).collect());
    }
    Ok(rows)
}

/// Read the first worksheet of an xlsx workbook
pub fn read_xlsx(bytes: &[u8]) -> Result<Rows> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Parse("workbook has no worksheets".to_string()))??;

    // calamine trims leading empty columns; pad them back so column A is index 0
    let offset = range.start().map_or(0, |(_, col)| col as usize);

    Ok(range
        .rows()
        .map(|row| {
            std::iter::repeat_n(String::new(), offset)
                .chain(row.iter().map(ToString::to_string))
                .collect()
        })
        .collect())
}

/// Pick the identifier column out of a table
///
/// Resolution order:
/// 1. both `Series UID` and `SeriesInstanceUID` present - ambiguous, fail
/// 2. `SeriesInstanceUID` column, rows after the header
/// 3. `Series UID` column, rows after the header
/// 4. no known header - first column of every row, header row included
pub fn select_identifiers(rows: &[Vec<String>]) -> Result<IdentifierList> {
    let Some(header) = rows.first() else {
        return Ok(IdentifierList::new());
    };
    let find = |name: &str| header.iter().position(|cell| cell.trim() == name);

    let (column, data) = match (find(SERIES_INSTANCE_UID), find(SERIES_UID)) {
        (Some(_), Some(_)) => return Err(Error::AmbiguousColumns),
        (Some(idx), None) | (None, Some(idx)) => {
            debug!(column = %header[idx].trim(), "using named identifier column");
            (idx, &rows[1..])
        }
        (None, None) => {
            debug!("no identifier header, using first column");
            (0, rows)
        }
    };

    Ok(data
        .iter()
        .filter_map(|row| row.get(column))
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .collect())
}
