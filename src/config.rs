//! Configuration
//!
//! Settings are layered: built-in defaults, then the TOML file, then
//! environment variables.

use crate::error::{Error, Result};
use crate::extract::{ExtractOptions, DEFAULT_MANIFEST_PREAMBLE_LINES};
use crate::nbia::ServiceConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default NBIA REST services base
pub const DEFAULT_API_URL: &str = "https://services.cancerimagingarchive.net/nbia-api/services/";

/// Default NBIA OAuth token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://services.cancerimagingarchive.net/nbia-api/oauth/token";

/// Default search page that opens saved carts
pub const DEFAULT_CART_SEARCH_URL: &str = "https://nbia.cancerimagingarchive.net/nbia-search/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding `api_url`
pub const ENV_API_URL: &str = "NBIA_API_URL";
/// Environment variable overriding `token_url`
pub const ENV_TOKEN_URL: &str = "NBIA_TOKEN_URL";
/// Environment variable overriding `cart_search_url`
pub const ENV_CART_SEARCH_URL: &str = "NBIA_CART_SEARCH_URL";

const APP_DIR: &str = "nbia-cart";
const CONFIG_FILE: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base of the NBIA REST services
    pub api_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Search page that opens saved carts
    pub cart_search_url: String,
    /// Lines skipped at the top of `.tcia` manifests
    pub manifest_preamble_lines: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            cart_search_url: DEFAULT_CART_SEARCH_URL.to_string(),
            manifest_preamble_lines: DEFAULT_MANIFEST_PREAMBLE_LINES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Default config file location (`<config dir>/nbia-cart/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Parse TOML config text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overrides = [
            (ENV_API_URL, &mut self.api_url),
            (ENV_TOKEN_URL, &mut self.token_url),
            (ENV_CART_SEARCH_URL, &mut self.cart_search_url),
        ];
        for (key, field) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                debug!(key, "config overridden from environment");
                *field = value.trim().to_string();
            }
        }
    }

    /// Check that every URL parses and limits are sane
    pub fn validate(&self) -> Result<()> {
        self.service_config().map(|_| ())
    }

    /// Endpoints for the NBIA client
    pub fn service_config(&self) -> Result<ServiceConfig> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".to_string()));
        }

        // `Url::join` replaces the last segment unless the base ends with '/'
        let api_url = if self.api_url.ends_with('/') {
            self.api_url.clone()
        } else {
            format!("{}/", self.api_url)
        };

        Ok(ServiceConfig {
            api_url: parse_url("api_url", &api_url)?,
            token_url: parse_url("token_url", &self.token_url)?,
            cart_search_url: parse_url("cart_search_url", &self.cart_search_url)?,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    /// Extraction settings derived from this config
    pub const fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            manifest_preamble_lines: self.manifest_preamble_lines,
        }
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| Error::Config(format!("invalid {field} '{value}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "invalid {field} '{value}': expected an http or https URL"
        )));
    }
    Ok(url)
}
