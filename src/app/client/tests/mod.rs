//! Tests for the template client against a local mock server

use std::sync::Mutex;

use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::app::events::{InitEvent, NullSink};
use crate::errors::AcquireError;

fn url_for(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
}

#[tokio::test]
async fn test_download_reports_progress_and_returns_body() {
    let server = MockServer::start().await;
    let body = vec![7_u8; 64 * 1024];

    Mock::given(method("GET"))
        .and(path("/archive/main.zip"))
        .and(header("user-agent", "suckson-cli/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let client = TemplateClient::new().unwrap();
    let events = Mutex::new(Vec::new());
    let sink = |event: InitEvent| events.lock().unwrap().push(event);

    let downloaded = client
        .download_archive(&url_for(&server, "/archive/main.zip"), &sink)
        .await
        .unwrap();

    assert_eq!(downloaded, body);
    let events = events.into_inner().unwrap();
    assert!(!events.is_empty());
    assert_eq!(
        events.last(),
        Some(&InitEvent::DownloadProgress {
            downloaded: body.len() as u64,
            total: Some(body.len() as u64),
        })
    );
}

#[tokio::test]
async fn test_missing_archive_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = TemplateClient::new().unwrap();
    let result = client
        .download_archive(&url_for(&server, "/missing.zip"), &NullSink)
        .await;

    match result {
        Err(AcquireError::NotFound { url }) => assert!(url.ends_with("/missing.zip")),
        other => panic!("Expected AcquireError::NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = TemplateClient::new().unwrap();
    let result = client
        .download_archive(&url_for(&server, "/archive.zip"), &NullSink)
        .await;

    // A single request: failures are never retried
    assert!(matches!(
        result,
        Err(AcquireError::ServerError { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_oversized_archive_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0_u8; 4096]))
        .mount(&server)
        .await;

    let client = TemplateClient::with_config(&ClientConfig::default(), 1024).unwrap();
    let result = client
        .download_archive(&url_for(&server, "/big.zip"), &NullSink)
        .await;

    assert!(matches!(
        result,
        Err(AcquireError::ArchiveTooLarge { limit: 1024 })
    ));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Nothing listens on port 1
    let url = Url::parse("http://127.0.0.1:1/archive.zip").unwrap();

    let client = TemplateClient::new().unwrap();
    let result = client.download_archive(&url, &NullSink).await;

    assert!(matches!(result, Err(AcquireError::Http(_))));
}
