//! Line-delimited identifier lists (`.txt`, `.tcia`)

use crate::error::{Error, Result};
use crate::types::IdentifierList;

/// Collect non-empty, trimmed lines after skipping `skip` leading raw lines
///
/// The skipped lines are counted before blank-line removal, so a manifest
/// preamble is dropped exactly as written.
pub fn read_lines(bytes: &[u8], skip: usize) -> Result<IdentifierList> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::Parse(format!("upload is not valid UTF-8 text: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    Ok(text
        .lines()
        .skip(skip)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect())
}
