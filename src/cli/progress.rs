//! Progress display for `init`
//!
//! Renders [`InitEvent`]s: a spinner with the downloaded size on a terminal,
//! plain lines when stderr is redirected. Quiet mode shows failures only.

use std::sync::Mutex;
use std::time::Duration;

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

use crate::app::{EventSink, InitEvent};

/// Event sink that reports progress to the user
pub struct ProgressDisplay {
    spinner: Mutex<Option<ProgressBar>>,
    is_terminal: bool,
    quiet: bool,
}

impl ProgressDisplay {
    /// Create a display; `quiet` suppresses everything except failures
    pub fn new(quiet: bool) -> Self {
        Self {
            spinner: Mutex::new(None),
            is_terminal: atty::is(atty::Stream::Stderr),
            quiet,
        }
    }

    fn start_spinner(&self, message: String) {
        if !self.is_terminal {
            eprintln!("{}", message);
            return;
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "●"]);
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn update_spinner(&self, message: String) {
        if let Ok(slot) = self.spinner.lock() {
            if let Some(spinner) = slot.as_ref() {
                spinner.set_message(message);
            }
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

impl EventSink for ProgressDisplay {
    fn emit(&self, event: InitEvent) {
        match event {
            // The failure line itself is printed once by `main`
            InitEvent::DownloadFailed { url, hints, .. } => {
                self.clear_spinner();
                for line in failure_details(&url, &hints) {
                    eprintln!("{}", line);
                }
            }
            _ if self.quiet => {}
            InitEvent::TargetCleared { path } => {
                eprintln!("Removed existing directory {}", path.display());
            }
            InitEvent::DownloadStarted { template, url } => {
                self.start_spinner(format!("Downloading {} template from {}", template, url));
            }
            InitEvent::DownloadProgress { downloaded, total } => {
                if self.is_terminal {
                    self.update_spinner(progress_message(downloaded, total));
                }
            }
            InitEvent::Extracting { bytes } => {
                let message = format!("Extracting template ({})", format_megabytes(bytes));
                if self.is_terminal {
                    self.update_spinner(message);
                } else {
                    eprintln!("{}", message);
                }
            }
            InitEvent::TemplateReady { path, files } => {
                self.clear_spinner();
                eprintln!(
                    "{} Template ready in {} ({} files)",
                    "✓".green(),
                    path.display(),
                    files
                );
            }
            InitEvent::ManifestPatched { path } => {
                eprintln!("{} Updated {}", "✓".green(), path.display());
            }
        }
    }
}

impl Drop for ProgressDisplay {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}

fn progress_message(downloaded: u64, total: Option<u64>) -> String {
    match total {
        Some(total) if total > 0 => format!(
            "Downloading template {} / {}",
            format_megabytes(downloaded),
            format_megabytes(total)
        ),
        _ => format!("Downloading template {}", format_megabytes(downloaded)),
    }
}

/// URL and troubleshooting lines shown after a failed download
fn failure_details(url: &Url, hints: &[String]) -> Vec<String> {
    let mut lines = vec![format!("  URL: {}", url), "  Troubleshooting:".to_string()];
    lines.extend(hints.iter().map(|hint| format!("    • {}", hint)));
    lines
}

/// Format a byte count as megabytes with one decimal
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}
