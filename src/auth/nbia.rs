//! NBIA credentials

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use crate::nbia::CartService;
use crate::submit::status_message;
use crate::types::{Credentials, SessionToken};
use std::env;
use tracing::debug;

/// Environment variable holding the NBIA username
pub const USERNAME_ENV: &str = "NBIA_USERNAME";

/// Environment variable holding the NBIA password
pub const PASSWORD_ENV: &str = "NBIA_PASSWORD";

/// Resolved NBIA credentials
#[derive(Debug, Clone)]
pub struct NbiaAuthConfig {
    /// Username and password
    pub credentials: Credentials,
    /// Where the credentials came from
    pub source: AuthSource,
}

/// Get NBIA credentials
///
/// Priority:
/// 1. username from `username` (the `--username` flag), else `NBIA_USERNAME`
/// 2. password from `NBIA_PASSWORD`, else `prompt(username)`
///
/// Returns `None` when no username is known, meaning anonymous access.
pub fn get_nbia_auth(
    username: Option<&str>,
    prompt: impl FnOnce(&str) -> Result<String>,
) -> Result<Option<NbiaAuthConfig>> {
    resolve_auth(username, |key| env::var(key).ok(), prompt)
}

fn resolve_auth(
    username: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
    prompt: impl FnOnce(&str) -> Result<String>,
) -> Result<Option<NbiaAuthConfig>> {
    let (username, mut source) = match username {
        Some(name) => (name.trim().to_string(), AuthSource::Flag),
        None => {
            debug!("checking {USERNAME_ENV} env var");
            match lookup(USERNAME_ENV) {
                Some(name) => (name.trim().to_string(), AuthSource::EnvVar),
                None => {
                    debug!("no NBIA username configured, using anonymous access");
                    return Ok(None);
                }
            }
        }
    };

    if username.is_empty() {
        return Err(Error::Auth("NBIA username must not be empty".to_string()));
    }

    debug!("checking {PASSWORD_ENV} env var");
    let password = if let Some(password) = lookup(PASSWORD_ENV) {
        password
    } else {
        debug!(%username, "prompting for NBIA password");
        source = AuthSource::Prompt;
        prompt(&username)?
    };

    Ok(Some(NbiaAuthConfig {
        credentials: Credentials { username, password },
        source,
    }))
}

/// Test NBIA credentials, returning the issued token
pub async fn test_nbia_auth(
    service: &dyn CartService,
    credentials: &Credentials,
) -> Result<SessionToken> {
    let outcome = service.authenticate(credentials).await?;
    match outcome.token {
        Some(token) if outcome.is_success() => Ok(token),
        _ => Err(Error::Auth(format!(
            "login rejected ({}): {}",
            outcome.status,
            status_message(outcome.status).unwrap_or("authentication failed")
        ))),
    }
}
