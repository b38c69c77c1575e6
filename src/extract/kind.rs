//! Upload format classification

use std::fmt;

/// Upload format, inferred from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.txt` - one identifier per line
    Text,
    /// `.tcia` - TCIA manifest, preamble followed by one identifier per line
    Manifest,
    /// `.csv` - comma-separated table
    Csv,
    /// `.xlsx` - Excel workbook, first sheet is used
    Xlsx,
    /// Anything else - tab-separated table
    Tsv,
}

impl FileKind {
    /// Classify a file by case-insensitive suffix match on its name
    pub fn from_file_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        if name.ends_with(".txt") {
            Self::Text
        } else if name.ends_with(".tcia") {
            Self::Manifest
        } else if name.ends_with(".csv") {
            Self::Csv
        } else if name.ends_with(".xlsx") {
            Self::Xlsx
        } else {
            Self::Tsv
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text list"),
            Self::Manifest => write!(f, "TCIA manifest"),
            Self::Csv => write!(f, "CSV"),
            Self::Xlsx => write!(f, "XLSX"),
            Self::Tsv => write!(f, "tab-separated"),
        }
    }
}
