//! Events emitted while initializing a project
//!
//! The initialization flow never writes to the console itself. It reports
//! what happens through an [`EventSink`], and the CLI decides how to render it.

use std::path::PathBuf;

use url::Url;

use crate::app::models::Template;

/// Something observable happened during `init`
#[derive(Debug, Clone, PartialEq)]
pub enum InitEvent {
    /// An existing destination was removed
    TargetCleared { path: PathBuf },
    /// Archive request is about to be sent
    DownloadStarted { template: Template, url: Url },
    /// Bytes received so far
    DownloadProgress { downloaded: u64, total: Option<u64> },
    /// Archive fully received, extraction starting
    Extracting { bytes: u64 },
    /// Template extracted into its destination
    TemplateReady { path: PathBuf, files: usize },
    /// Acquisition failed; carries troubleshooting hints for the user
    DownloadFailed {
        url: Url,
        reason: String,
        hints: Vec<String>,
    },
    /// Manifest rewritten with the user's answers
    ManifestPatched { path: PathBuf },
}

/// Receiver of [`InitEvent`]s
pub trait EventSink: Send + Sync {
    /// Handle one event
    fn emit(&self, event: InitEvent);
}

impl<F> EventSink for F
where
    F: Fn(InitEvent) + Send + Sync,
{
    fn emit(&self, event: InitEvent) {
        self(event)
    }
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: InitEvent) {}
}
