//! HTTP client for template archives
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: single-shot requests with status classification
//! - `download`: streaming archive download with progress events

use url::Url;

use crate::app::events::EventSink;
use crate::constants::acquisition;
use crate::errors::AcquireResult;

pub mod config;
pub mod download;
pub mod http;

#[cfg(test)]
mod tests;

pub use config::ClientConfig;

use download::DownloadHandler;
use http::HttpHandler;

/// HTTP client used to fetch template archives
#[derive(Debug, Clone)]
pub struct TemplateClient {
    http_handler: HttpHandler,
    max_archive_bytes: u64,
}

impl TemplateClient {
    /// Creates a client with the default configuration
    ///
    /// # Errors
    ///
    /// Returns `AcquireError` if HTTP client creation fails
    pub fn new() -> AcquireResult<Self> {
        Self::with_config(&ClientConfig::default(), acquisition::MAX_ARCHIVE_BYTES)
    }

    /// Creates a client with custom configuration and archive size limit
    ///
    /// # Errors
    ///
    /// Returns `AcquireError` if HTTP client creation fails
    pub fn with_config(config: &ClientConfig, max_archive_bytes: u64) -> AcquireResult<Self> {
        let client = config.build_http_client()?;
        tracing::debug!("Created template client ({})", config.user_agent);

        Ok(Self {
            http_handler: HttpHandler::new(client),
            max_archive_bytes,
        })
    }

    /// Downloads an archive into memory, reporting progress to `sink`
    ///
    /// # Errors
    ///
    /// Returns `AcquireError` if the request fails, the status is an error,
    /// the body is too large or truncated
    pub async fn download_archive(&self, url: &Url, sink: &dyn EventSink) -> AcquireResult<Vec<u8>> {
        DownloadHandler::new(&self.http_handler, self.max_archive_bytes)
            .download_archive(url, sink)
            .await
    }
}
