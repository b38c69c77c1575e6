//! Per-invocation session context
//!
//! A [`Session`] is created once when a command starts and handed by
//! reference to each stage. Credentials live only as long as the session
//! and are dropped by [`Session::clear`] once a submission is over.

use crate::config::Config;
use crate::extract::ExtractOptions;
use crate::error::Result;
use crate::nbia::NbiaClient;
use crate::types::Credentials;

/// Configuration and credentials for one command run
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    credentials: Option<Credentials>,
}

impl Session {
    /// Start a session without credentials
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            credentials: None,
        }
    }

    /// Attach credentials for restricted content
    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Active configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Credentials, if the user supplied any
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Override the manifest preamble length for this run
    pub fn set_manifest_preamble_lines(&mut self, lines: usize) {
        self.config.manifest_preamble_lines = lines;
    }

    /// Extraction settings for this run
    pub const fn extract_options(&self) -> ExtractOptions {
        self.config.extract_options()
    }

    /// Build an NBIA client from the session config
    pub fn client(&self) -> Result<NbiaClient> {
        NbiaClient::new(self.config.service_config()?)
    }

    /// Forget credentials
    pub fn clear(&mut self) {
        self.credentials = None;
    }
}
