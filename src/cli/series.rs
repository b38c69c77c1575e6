//! Series command - list a collection's series UIDs

use crate::cli::style::{check, spinner_style, Stylize};
use anstream::{eprintln, print, println};
use indicatif::ProgressBar;
use nbia_cart::auth::test_nbia_auth;
use nbia_cart::error::{Error, Result};
use nbia_cart::nbia::CartService;
use nbia_cart::session::Session;
use nbia_cart::types::{SeriesQuery, SeriesRecord};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

/// Options for the series command
#[derive(Debug, Clone, Default)]
pub struct SeriesOptions<'a> {
    /// Collection to query
    pub collection: &'a str,
    /// Only series with this modality
    pub modality: Option<&'a str>,
    /// Only series with this body part
    pub body_part: Option<&'a str>,
    /// Write the UID list here instead of stdout
    pub output: Option<&'a Path>,
}

/// Run the series command
pub async fn run_series(session: &mut Session, options: SeriesOptions<'_>) -> Result<()> {
    if options.collection.trim().is_empty() {
        return Err(Error::InvalidArgument("collection must not be empty".to_string()));
    }

    let query = SeriesQuery {
        collection: options.collection.trim().to_string(),
        modality: options.modality.map(ToString::to_string),
        body_part: options.body_part.map(ToString::to_string),
    };

    let service = session.client()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let fetched = fetch_series(&service, session, &query, &spinner).await;
    session.clear();
    spinner.finish_and_clear();
    let series = fetched?;

    let listing = format_uid_list(&series);
    match options.output {
        Some(path) => {
            tokio::fs::write(path, listing).await?;
            println!(
                "{} Wrote {} series UID{} to {}",
                check(),
                series.len(),
                if series.len() == 1 { "" } else { "s" },
                path.display().accent()
            );
        }
        None => print!("{listing}"),
    }

    if series.is_empty() {
        eprintln!("{}", format!("No series found in {}", query.collection).muted());
    }
    Ok(())
}

async fn fetch_series(
    service: &dyn CartService,
    session: &Session,
    query: &SeriesQuery,
    spinner: &ProgressBar,
) -> Result<Vec<SeriesRecord>> {
    let token = match session.credentials() {
        Some(credentials) => {
            spinner.set_message("Authenticating...");
            Some(test_nbia_auth(service, credentials).await?)
        }
        None => None,
    };

    spinner.set_message(format!("Fetching series for {}...", query.collection));
    service.get_series(query, token.as_ref()).await
}

/// One UID per line, ready to be fed back to `create` as a `.txt` file
fn format_uid_list(series: &[SeriesRecord]) -> String {
    series.iter().fold(String::new(), |mut out, record| {
        let _ = writeln!(out, "{}", record.series_instance_uid);
        out
    })
}
