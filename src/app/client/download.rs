//! Archive download with progress reporting
//!
//! The archive is streamed chunk by chunk into memory so that progress can be
//! reported, then handed to the extractor as one buffer.

use url::Url;

use crate::app::client::http::HttpHandler;
use crate::app::events::{EventSink, InitEvent};
use crate::errors::{AcquireError, AcquireResult};

/// Archive download operations handler
pub struct DownloadHandler<'a> {
    http_handler: &'a HttpHandler,
    max_bytes: u64,
}

impl<'a> DownloadHandler<'a> {
    /// Creates a new DownloadHandler that refuses bodies over `max_bytes`
    pub fn new(http_handler: &'a HttpHandler, max_bytes: u64) -> Self {
        Self {
            http_handler,
            max_bytes,
        }
    }

    /// Download the archive body, reporting progress to `sink`
    ///
    /// # Errors
    ///
    /// Returns `AcquireError` if:
    /// - The request fails or the server answers with an error status
    /// - The body exceeds the size limit
    /// - Fewer bytes arrive than the server announced
    pub async fn download_archive(&self, url: &Url, sink: &dyn EventSink) -> AcquireResult<Vec<u8>> {
        let mut response = self.http_handler.get_response(url).await?;

        let total = response.content_length();
        if let Some(total) = total {
            if total > self.max_bytes {
                return Err(AcquireError::ArchiveTooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        let mut body = Vec::with_capacity(total.unwrap_or(0) as usize);
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            let downloaded = body.len() as u64;
            if downloaded > self.max_bytes {
                return Err(AcquireError::ArchiveTooLarge {
                    limit: self.max_bytes,
                });
            }
            sink.emit(InitEvent::DownloadProgress { downloaded, total });
        }

        let received = body.len() as u64;
        if let Some(expected) = total {
            if received != expected {
                return Err(AcquireError::IncompleteDownload { received, expected });
            }
        }

        tracing::info!("Downloaded {} bytes from {}", received, url);
        Ok(body)
    }
}
