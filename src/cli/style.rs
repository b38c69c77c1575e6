//! Terminal styling
//!
//! Colors are applied unconditionally; output goes through `anstream`, which
//! strips them when the stream is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Semantic text styles
pub trait Stylize {
    /// Highlighted value (names, URLs, commands)
    fn accent(&self) -> String;
    /// De-emphasized detail
    fn muted(&self) -> String;
    /// Headings
    fn emphasis(&self) -> String;
    /// Failure text
    fn failure(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn failure(&self) -> String {
        self.red().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    "✓".green().to_string()
}

/// Red cross
pub fn cross() -> String {
    "✗".red().to_string()
}

/// Yellow warning marker
pub fn caution() -> String {
    "!".yellow().bold().to_string()
}

/// Spinner style shared by network-bound commands
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render a URL as a clickable link when the terminal supports it
pub fn hyperlink(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}
