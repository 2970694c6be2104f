//! Template acquisition
//!
//! Downloads a template archive and extracts it into the destination,
//! racing the whole operation against a fixed time budget. When the timer
//! wins during the download, the download future is dropped (closing the
//! connection); during extraction, the extraction is stopped and awaited.
//! Either way nothing is left running or half-written once `acquire` returns.
//!
//! Failures are terminal for the run: nothing here retries. Troubleshooting
//! hints travel with the `DownloadFailed` event for the caller to present.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use crate::app::archive::extract_archive;
use crate::app::client::{ClientConfig, TemplateClient};
use crate::app::events::{EventSink, InitEvent};
use crate::app::models::Template;
use crate::constants::{acquisition, remediation, templates};
use crate::errors::{AcquireError, AcquireResult};

/// Archive URL for each template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSources {
    /// Archive for the `vue` template
    pub vue: String,
    /// Archive for the `react` template
    pub react: String,
    /// Archive for the `node` template
    pub node: String,
}

impl Default for TemplateSources {
    fn default() -> Self {
        Self {
            vue: templates::VUE_ARCHIVE_URL.to_string(),
            react: templates::REACT_ARCHIVE_URL.to_string(),
            node: templates::NODE_ARCHIVE_URL.to_string(),
        }
    }
}

impl TemplateSources {
    /// Archive URL configured for `template`
    pub fn url_for(&self, template: Template) -> &str {
        match template {
            Template::Vue => &self.vue,
            Template::React => &self.react,
            Template::Node => &self.node,
        }
    }
}

/// Runtime configuration for [`TemplateFetcher`]
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// HTTP client settings
    pub client: ClientConfig,
    /// Budget for download plus extraction
    pub timeout: Duration,
    /// Prefix prepended to every archive URL
    pub mirror: Option<String>,
    /// Largest archive accepted
    pub max_archive_bytes: u64,
    /// Archive URL per template
    pub sources: TemplateSources,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            timeout: acquisition::FETCH_TIMEOUT,
            mirror: None,
            max_archive_bytes: acquisition::MAX_ARCHIVE_BYTES,
            sources: TemplateSources::default(),
        }
    }
}

/// Downloads templates into destination directories
#[derive(Debug, Clone)]
pub struct TemplateFetcher {
    client: TemplateClient,
    timeout: Duration,
    mirror: Option<String>,
    sources: TemplateSources,
}

impl TemplateFetcher {
    /// Create a fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `AcquireError` if the HTTP client cannot be built
    pub fn new(config: FetcherConfig) -> AcquireResult<Self> {
        let client = TemplateClient::with_config(&config.client, config.max_archive_bytes)?;
        Ok(Self {
            client,
            timeout: config.timeout,
            mirror: config.mirror.filter(|m| !m.trim().is_empty()),
            sources: config.sources,
        })
    }

    /// Time budget applied to every acquisition
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured archive URL for `template`, without the mirror
    ///
    /// # Errors
    ///
    /// Returns `AcquireError::InvalidUrl` if the configured URL does not parse
    pub fn source_url(&self, template: Template) -> AcquireResult<Url> {
        parse_url(self.sources.url_for(template))
    }

    /// Resolve the archive URL for `template`, with the mirror applied
    ///
    /// # Errors
    ///
    /// Returns `AcquireError::InvalidUrl` if the resulting URL does not parse
    pub fn archive_url(&self, template: Template) -> AcquireResult<Url> {
        let source = self.sources.url_for(template);
        match &self.mirror {
            Some(mirror) => parse_url(&format!("{}{}", mirror, source)),
            None => parse_url(source),
        }
    }

    /// Fetch `template` into `destination`
    ///
    /// The destination must not exist. Progress and the final outcome are
    /// reported to `sink`. Returns the number of files extracted.
    ///
    /// # Errors
    ///
    /// Returns `AcquireError::Timeout` if the budget elapses first, or the
    /// underlying download/extraction error otherwise. Either way nothing is
    /// left on disk.
    pub async fn acquire(
        &self,
        template: Template,
        destination: &Path,
        sink: &dyn EventSink,
    ) -> AcquireResult<usize> {
        let source = self.source_url(template)?;
        let url = self.archive_url(template)?;

        if tokio::fs::symlink_metadata(destination).await.is_ok() {
            return Err(AcquireError::DestinationExists {
                path: destination.to_path_buf(),
            });
        }

        info!("Fetching template '{}' from {}", template, url);
        sink.emit(InitEvent::DownloadStarted {
            template,
            url: url.clone(),
        });

        let outcome = self.fetch_into(&url, destination, sink).await;
        match outcome {
            Ok(files) => {
                sink.emit(InitEvent::TemplateReady {
                    path: destination.to_path_buf(),
                    files,
                });
                Ok(files)
            }
            Err(error) => {
                sink.emit(InitEvent::DownloadFailed {
                    url,
                    reason: error.to_string(),
                    hints: remediation_hints(&source, self.mirror.as_deref()),
                });
                Err(error)
            }
        }
    }

    /// Download then extract, both against the same deadline
    async fn fetch_into(&self, url: &Url, destination: &Path, sink: &dyn EventSink) -> AcquireResult<usize> {
        let deadline = Instant::now() + self.timeout;

        let bytes = tokio::time::timeout_at(deadline, self.client.download_archive(url, sink))
            .await
            .map_err(|_| self.timed_out())??;

        sink.emit(InitEvent::Extracting {
            bytes: bytes.len() as u64,
        });
        debug!("Extracting {} bytes into {}", bytes.len(), destination.display());

        extract_archive(bytes, destination, deadline)
            .await
            .map_err(|error| match error {
                AcquireError::Cancelled => self.timed_out(),
                other => other,
            })
    }

    fn timed_out(&self) -> AcquireError {
        warn!("Template download exceeded {:?}", self.timeout);
        AcquireError::Timeout {
            limit: self.timeout,
        }
    }
}

fn parse_url(raw: &str) -> AcquireResult<Url> {
    Url::parse(raw).map_err(|e| AcquireError::InvalidUrl {
        url: raw.to_string(),
        error: e.to_string(),
    })
}

/// Advice shown to the user after a failed download of `source`
///
/// `mirror` is the prefix that was in use, if any.
pub fn remediation_hints(source: &Url, mirror: Option<&str>) -> Vec<String> {
    let mirror_suggestion = match mirror {
        Some(mirror) => format!(
            "Try a different mirror than {} or download {} manually",
            mirror, source
        ),
        None => format!(
            "Try a mirror: {}{} (set --mirror or SUCKSON_MIRROR)",
            remediation::SUGGESTED_MIRROR,
            source
        ),
    };

    vec![
        mirror_suggestion,
        "Check your firewall, proxy or VPN settings".to_string(),
        format!(
            "Run `ping {}` to test connectivity",
            remediation::CONNECTIVITY_HOST
        ),
    ]
}
