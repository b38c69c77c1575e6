//! Create command - build a shared cart from an uploaded file

use crate::cli::extract::{read_upload, warn_suspicious};
use crate::cli::style::{check, cross, hyperlink, Stylize};
use crate::cli::CliProgress;
use anstream::{eprintln, println};
use nbia_cart::error::{Error, Result};
use nbia_cart::session::Session;
use nbia_cart::submit::{generate_cart_name, submit_cart, Phase, ProgressCallback, SubmissionResult};
use nbia_cart::types::CartRequest;
use std::path::Path;

/// Options for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateOptions<'a> {
    /// Cart name; generated when absent
    pub name: Option<&'a str>,
    /// Cart description
    pub description: Option<&'a str>,
    /// Link describing the cart
    pub description_url: Option<&'a str>,
    /// Dry run - show the request without sending it
    pub dry_run: bool,
}

/// Run the create command
///
/// Returns whether the cart was created (always `true` for a dry run).
pub async fn run_create(session: &mut Session, file: &Path, options: CreateOptions<'_>) -> Result<bool> {
    let progress = CliProgress::spinner();

    progress.on_phase(Phase::Extracting).await;
    let identifiers = read_upload(file, &session.extract_options()).await?;
    if identifiers.is_empty() {
        return Err(Error::EmptyIdentifierList);
    }
    warn_suspicious(&identifiers);

    let request = CartRequest {
        name: options
            .name
            .map_or_else(generate_cart_name, |name| name.trim().to_string()),
        description: non_blank(options.description),
        description_url: non_blank(options.description_url),
        identifiers,
    };
    if request.name.is_empty() {
        return Err(Error::InvalidArgument("cart name must not be empty".to_string()));
    }

    if options.dry_run {
        progress.on_phase(Phase::Complete).await;
        print_request_preview(&request);
        return Ok(true);
    }

    let service = session.client()?;
    let result = submit_cart(&request, session.credentials(), &service, &progress).await;
    session.clear();
    let result = result?;

    print_result(&result);
    Ok(result.is_success())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Print the outcome of a submission
fn print_result(result: &SubmissionResult) {
    match result {
        SubmissionResult::Success(url) => {
            println!("{} Shared cart created successfully!", check());
            println!("  {}", hyperlink(url).accent());
        }
        SubmissionResult::TransportException(_) => {
            eprintln!("{} {}", cross(), result.failure());
            eprintln!(
                "  {}",
                "The request may not have reached NBIA; check your connection and try again.".muted()
            );
        }
        _ => {
            eprintln!("{} Failed to create shared cart", cross());
            eprintln!("  {}", result.failure());
        }
    }
}

/// Print what a dry run would submit
fn print_request_preview(request: &CartRequest) {
    println!("Would create shared cart {}", request.name.accent());
    if let Some(ref description) = request.description {
        println!("  {} {description}", "Description:".muted());
    }
    if let Some(ref url) = request.description_url {
        println!("  {} {url}", "Description URL:".muted());
    }
    println!(
        "  {} {} series",
        "Identifiers:".muted(),
        request.identifiers.len()
    );
    for id in request.identifiers.iter().take(5) {
        println!("    - {id}");
    }
    if request.identifiers.len() > 5 {
        println!("    {}", format!("... and {} more", request.identifiers.len() - 5).muted());
    }
}
