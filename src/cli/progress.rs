//! Shared CLI progress callback

use crate::cli::style::{spinner_style, Stylize};
use async_trait::async_trait;
use indicatif::ProgressBar;
use nbia_cart::submit::{Phase, ProgressCallback};
use std::time::Duration;

/// CLI progress callback backed by a spinner on stderr
///
/// The spinner is cleared on [`Phase::Complete`] or when dropped, so early
/// returns never leave a stale frame behind.
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Create a ticking spinner
    pub fn spinner() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => self.spinner.finish_and_clear(),
            _ => self.spinner.set_message(format!("{phase}...")),
        }
    }

    async fn on_message(&self, message: &str) {
        self.spinner.println(format!("  {}", message.muted()));
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
