//! Extract command - print the identifiers found in an upload

use crate::cli::style::{caution, Stylize};
use anstream::{eprintln, println};
use nbia_cart::error::{Error, Result};
use nbia_cart::extract::{extract_with, looks_like_dicom_uid, ExtractOptions, FileKind};
use nbia_cart::session::Session;
use nbia_cart::types::IdentifierList;
use std::path::Path;
use tracing::debug;

/// Read an upload from disk and extract its identifiers
pub async fn read_upload(path: &Path, options: &ExtractOptions) -> Result<IdentifierList> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::InvalidArgument(format!("cannot read {}: {e}", path.display())))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let kind = FileKind::from_file_name(file_name);
    debug!(path = %path.display(), %kind, "reading upload");

    extract_with(&bytes, kind, options)
}

/// Warn about values that do not look like DICOM UIDs
///
/// Returns the number of suspicious values.
pub fn warn_suspicious(identifiers: &IdentifierList) -> usize {
    let suspicious: Vec<&String> = identifiers
        .iter()
        .filter(|id| !looks_like_dicom_uid(id))
        .collect();

    if let Some(first) = suspicious.first() {
        eprintln!(
            "{} {} of {} values do not look like DICOM series UIDs (first: {})",
            caution(),
            suspicious.len(),
            identifiers.len(),
            first.accent()
        );
    }
    suspicious.len()
}

/// Run the extract command
pub async fn run_extract(session: &Session, file: &Path) -> Result<()> {
    let identifiers = read_upload(file, &session.extract_options()).await?;

    for id in &identifiers {
        println!("{id}");
    }

    warn_suspicious(&identifiers);
    eprintln!(
        "{}",
        format!(
            "{} identifier{} from {}",
            identifiers.len(),
            if identifiers.len() == 1 { "" } else { "s" },
            file.display()
        )
        .muted()
    );
    Ok(())
}
