//! Error types for nbia-cart

use thiserror::Error;

/// Errors that can occur while extracting identifiers or talking to NBIA
#[derive(Error, Debug)]
pub enum Error {
    /// Uploaded file could not be decoded or parsed
    #[error("failed to parse upload: {0}")]
    Parse(String),

    /// Both `Series UID` and `SeriesInstanceUID` columns are present
    #[error(
        "ambiguous identifier columns: found both 'Series UID' and 'SeriesInstanceUID', keep only one"
    )]
    AmbiguousColumns,

    /// No identifiers were extracted from the upload
    #[error("no series identifiers found in upload")]
    EmptyIdentifierList,

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Authentication problem (missing credentials, rejected token)
    #[error("authentication error: {0}")]
    Auth(String),

    /// NBIA API returned something we could not use
    #[error("NBIA API error: {0}")]
    NbiaApi(String),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<calamine::XlsxError> for Error {
    fn from(e: calamine::XlsxError) -> Self {
        Self::Parse(format!("invalid xlsx workbook: {e}"))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
