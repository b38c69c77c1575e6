//! CLI command implementations

mod auth;
mod create;
mod extract;
mod progress;
mod series;
pub mod style;

pub use auth::{run_auth, AuthAction};
pub use create::{run_create, CreateOptions};
pub use extract::run_extract;
pub use progress::CliProgress;
pub use series::{run_series, SeriesOptions};

use nbia_cart::error::{Error, Result};

/// Ask for a password without echoing it
pub fn prompt_password(username: &str) -> Result<String> {
    dialoguer::Password::new()
        .with_prompt(format!("NBIA password for {username}"))
        .allow_empty_password(true)
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read password: {e}")))
}
