//! nbia-cart - shared carts for NBIA
//!
//! CLI binary for turning series UID lists, TCIA manifests and spreadsheets
//! into NBIA shared carts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use nbia_cart::auth::get_nbia_auth;
use nbia_cart::config::Config;
use nbia_cart::session::Session;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "nbia-cart")]
#[command(about = "Create NBIA shared carts from series UID lists, manifests and spreadsheets")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to <config dir>/nbia-cart/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a shared cart from a .txt, .tcia, .csv, .xlsx or tab-separated file
    Create {
        /// File containing series instance UIDs
        file: PathBuf,

        /// Shared cart name (default: nbia-<18 random digits>)
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Shared cart description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// URL of a page describing the cart
        #[arg(long)]
        description_url: Option<String>,

        /// NBIA username for restricted collections
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Lines to skip at the top of a .tcia manifest
        #[arg(long)]
        preamble_lines: Option<usize>,

        /// Dry run - show what would be submitted without contacting NBIA
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the series UIDs that would be read from a file
    Extract {
        /// File containing series instance UIDs
        file: PathBuf,

        /// Lines to skip at the top of a .tcia manifest
        #[arg(long)]
        preamble_lines: Option<usize>,
    },

    /// List the series UIDs of a collection
    Series {
        /// Collection name
        #[arg(long, short = 'c')]
        collection: String,

        /// Only series with this modality (e.g. CT, MR)
        #[arg(long, short = 'm')]
        modality: Option<String>,

        /// Only series with this body part (e.g. CHEST)
        #[arg(long)]
        body_part: Option<String>,

        /// Write the UIDs to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// NBIA username for restricted collections
        #[arg(long, short = 'u')]
        username: Option<String>,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Test authentication
    Test {
        /// NBIA username
        #[arg(long, short = 'u')]
        username: Option<String>,
    },
    /// Show authentication setup instructions
    Setup,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "nbia_cart=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build the session, resolving credentials only when a command can use them
fn open_session(config: Config, username: Option<&str>, wants_auth: bool) -> Result<Session> {
    let session = Session::new(config);
    if !wants_auth {
        return Ok(session);
    }
    let auth = get_nbia_auth(username, cli::prompt_password)?;
    if let Some(ref auth) = auth {
        tracing::debug!(source = ?auth.source, "using NBIA credentials");
    }
    Ok(session.with_credentials(auth.map(|a| a.credentials)))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Ok(Config::load(path)?)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Create {
            file,
            name,
            description,
            description_url,
            username,
            preamble_lines,
            dry_run,
        } => {
            let mut session = open_session(config, username.as_deref(), !dry_run)?;
            if let Some(lines) = preamble_lines {
                session.set_manifest_preamble_lines(lines);
            }

            let created = cli::run_create(
                &mut session,
                &file,
                cli::CreateOptions {
                    name: name.as_deref(),
                    description: description.as_deref(),
                    description_url: description_url.as_deref(),
                    dry_run,
                },
            )
            .await?;

            if !created {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Extract {
            file,
            preamble_lines,
        } => {
            let mut session = open_session(config, None, false)?;
            if let Some(lines) = preamble_lines {
                session.set_manifest_preamble_lines(lines);
            }
            cli::run_extract(&session, &file).await?;
        }
        Commands::Series {
            collection,
            modality,
            body_part,
            output,
            username,
        } => {
            let mut session = open_session(config, username.as_deref(), true)?;
            cli::run_series(
                &mut session,
                cli::SeriesOptions {
                    collection: &collection,
                    modality: modality.as_deref(),
                    body_part: body_part.as_deref(),
                    output: output.as_deref(),
                },
            )
            .await?;
        }
        Commands::Auth { action } => match action {
            AuthCommand::Test { username } => {
                let mut session = open_session(config, username.as_deref(), true)?;
                cli::run_auth(&mut session, cli::AuthAction::Test).await?;
            }
            AuthCommand::Setup => {
                let mut session = open_session(config, None, false)?;
                cli::run_auth(&mut session, cli::AuthAction::Setup).await?;
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
