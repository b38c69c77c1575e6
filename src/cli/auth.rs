//! Auth command - test and explain NBIA authentication

use crate::cli::style::{check, spinner_style, Stylize};
use anstream::println;
use indicatif::ProgressBar;
use nbia_cart::auth::{test_nbia_auth, PASSWORD_ENV, USERNAME_ENV};
use nbia_cart::error::{Error, Result};
use nbia_cart::session::Session;
use std::time::Duration;

/// Auth subcommand action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Log in and report the result
    Test,
    /// Print setup instructions
    Setup,
}

/// Run the auth test command
pub async fn run_auth_test(session: &mut Session) -> Result<()> {
    let credentials = session.credentials().cloned().ok_or_else(|| {
        Error::Auth(format!(
            "No NBIA username given. Pass --username or set {USERNAME_ENV}"
        ))
    })?;
    session.clear();

    let service = session.client()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Testing NBIA authentication...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let token = test_nbia_auth(&service, &credentials).await;
    spinner.finish_and_clear();
    let token = token?;

    println!(
        "{} Authenticated as: {}",
        check(),
        credentials.username.accent()
    );
    println!("  {} {}", "Token endpoint:".muted(), session.config().token_url);
    if let Some(expires_in) = token.expires_in {
        println!("  {} {expires_in}s", "Token lifetime:".muted());
    }
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("{}", "NBIA Authentication Setup".emphasis());
    println!();
    println!(
        "{}",
        "Public collections need no login. Restricted collections need an NBIA account.".muted()
    );
    println!();
    println!("{}", "Option 1: Command-line flag".emphasis());
    println!("  Run: {}", "nbia-cart create --username <user> <file>".accent());
    println!("  The password is prompted for interactively.");
    println!();
    println!("{}", "Option 2: Environment variables".emphasis());
    println!("  export {}=<user>", USERNAME_ENV.accent());
    println!("  export {}=<password>", PASSWORD_ENV.accent());
    println!();
    println!("{}", "For a private NBIA deployment:".muted());
    println!(
        "  {}",
        "Set token_url and api_url in the config file, or NBIA_TOKEN_URL / NBIA_API_URL".muted()
    );
    if let Some(path) = nbia_cart::config::Config::default_path() {
        println!("  {} {}", "Config file:".muted(), path.display());
    }
}

/// Wrapper for auth commands
pub async fn run_auth(session: &mut Session, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Test => run_auth_test(session).await,
        AuthAction::Setup => {
            run_auth_setup();
            Ok(())
        }
    }
}
