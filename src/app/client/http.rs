//! Single-shot HTTP requests
//!
//! Every request is sent exactly once. A failure is terminal for the run, so
//! there is no retry or backoff here; status codes are classified into
//! `AcquireError` variants the CLI can explain.

use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::errors::{AcquireError, AcquireResult};

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Sends a GET request and returns the response if the status is a success
    ///
    /// # Errors
    ///
    /// Returns `AcquireError` if the request fails or the server answers with
    /// an error status
    pub async fn get_response(&self, url: &Url) -> AcquireResult<Response> {
        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", url, e);
            AcquireError::Http(e)
        })?;

        classify_status(response.status(), url)?;

        tracing::debug!("Received {} from {}", response.status(), url);
        Ok(response)
    }
}

/// Map a response status to an error, if it is one
fn classify_status(status: StatusCode, url: &Url) -> AcquireResult<()> {
    if status.is_success() {
        return Ok(());
    }

    let url = url.to_string();
    Err(match status {
        StatusCode::NOT_FOUND => AcquireError::NotFound { url },
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => AcquireError::Forbidden { url },
        status => AcquireError::ServerError {
            status: status.as_u16(),
            url,
        },
    })
}
