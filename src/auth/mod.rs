//! Authentication for restricted NBIA content
//!
//! Supports credentials from command-line flags, environment variables and
//! an interactive prompt.

mod nbia;

pub use nbia::{get_nbia_auth, test_nbia_auth, NbiaAuthConfig, PASSWORD_ENV, USERNAME_ENV};

/// Source of the credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Username from a command-line flag
    Flag,
    /// Credentials from environment variables
    EnvVar,
    /// Password typed at an interactive prompt
    Prompt,
}
