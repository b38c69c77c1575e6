//! Series identifier extraction
//!
//! Turns an uploaded file into an ordered [`IdentifierList`]. The format is
//! chosen from the file name (see [`FileKind`]); line-delimited formats are
//! read line by line, tabular formats go through header-based column
//! selection.

mod kind;
mod lines;
mod table;

pub use kind::FileKind;
pub use lines::read_lines;
pub use table::{read_delimited, read_xlsx, select_identifiers, SERIES_INSTANCE_UID, SERIES_UID};

use crate::error::Result;
use crate::types::IdentifierList;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Number of connection-parameter lines at the top of a TCIA manifest
pub const DEFAULT_MANIFEST_PREAMBLE_LINES: usize = 6;

/// Longest identifier DICOM allows for a UID
const MAX_UID_LEN: usize = 64;

/// Regex for DICOM UIDs: dot-separated numeric components without leading zeros
static RE_DICOM_UID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0|[1-9][0-9]*)(\.(0|[1-9][0-9]*))+$").unwrap());

/// Extraction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Raw lines skipped at the top of a `.tcia` manifest
    pub manifest_preamble_lines: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            manifest_preamble_lines: DEFAULT_MANIFEST_PREAMBLE_LINES,
        }
    }
}

/// Extract identifiers using the format implied by `file_name`
pub fn extract(bytes: &[u8], file_name: &str) -> Result<IdentifierList> {
    extract_with(
        bytes,
        FileKind::from_file_name(file_name),
        &ExtractOptions::default(),
    )
}

/// Extract identifiers from an upload of a known kind
pub fn extract_with(bytes: &[u8], kind: FileKind, options: &ExtractOptions) -> Result<IdentifierList> {
    debug!(%kind, size = bytes.len(), "extracting identifiers");

    let ids = match kind {
        FileKind::Text => read_lines(bytes, 0)?,
        FileKind::Manifest => read_lines(bytes, options.manifest_preamble_lines)?,
        FileKind::Csv => select_identifiers(&read_delimited(bytes, b',')?)?,
        FileKind::Tsv => select_identifiers(&read_delimited(bytes, b'\t')?)?,
        FileKind::Xlsx => select_identifiers(&read_xlsx(bytes)?)?,
    };

    debug!(%kind, count = ids.len(), "extracted identifiers");
    Ok(ids)
}

/// Whether a value has the shape of a DICOM UID
///
/// Only used for warnings; the remote service is the authority on which
/// identifiers exist.
pub fn looks_like_dicom_uid(value: &str) -> bool {
    value.len() <= MAX_UID_LEN && RE_DICOM_UID.is_match(value)
}
