//! End-to-end tests for `init` against a local archive server

mod support;

use std::time::Duration;

use serde_json::Value;
use suckson_cli::app::{AnswerSet, ConflictChoice, InitEvent, InitOutcome, InitRequest, Template};
use suckson_cli::errors::{AcquireError, AppError, ManifestError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{bulky_archive, initializer_for, template_archive, RecordingSink, ScriptedPrompter, ARCHIVE_ROUTE};

async fn serve_archive(server: &MockServer, body: Vec<u8>, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(ARCHIVE_ROUTE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn read_manifest(dir: &std::path::Path) -> Value {
    let content = std::fs::read_to_string(dir.join("package.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[tokio::test]
async fn test_demo_project_end_to_end() {
    let server = MockServer::start().await;
    serve_archive(&server, template_archive(true), Duration::ZERO).await;
    let workspace = TempDir::new().unwrap();

    let answers = AnswerSet {
        version: "2.0.0".to_string(),
        description: "My demo".to_string(),
        author: "Sam".to_string(),
        ..AnswerSet::with_defaults("demo", Template::Node)
    };
    let mut prompter = ScriptedPrompter::new(ConflictChoice::Cancel).with_answers(answers);
    let sink = RecordingSink::default();

    let outcome = initializer_for(&server, Duration::from_secs(10))
        .run(
            &InitRequest::new("demo", false),
            workspace.path(),
            &mut prompter,
            &sink,
        )
        .await
        .unwrap();

    let destination = workspace.path().join("demo");
    let InitOutcome::Completed(summary) = outcome else {
        panic!("expected a completed init");
    };
    assert_eq!(summary.destination, destination);
    assert_eq!(summary.files, 2);
    assert_eq!(prompter.conflicts_asked, 0);

    assert!(destination.join("src/index.js").is_file());
    let manifest = read_manifest(&destination);
    assert_eq!(manifest["name"], "demo");
    assert_eq!(manifest["version"], "2.0.0");
    assert_eq!(manifest["description"], "My demo");
    assert_eq!(manifest["author"], "Sam");
    assert_eq!(manifest["private"], true);
    assert_eq!(manifest["scripts"]["dev"], "vite");

    let events = sink.events();
    assert!(matches!(
        events.first(),
        Some(InitEvent::DownloadStarted {
            template: Template::Node,
            ..
        })
    ));
    let tail: Vec<&InitEvent> = events
        .iter()
        .filter(|e| !matches!(e, InitEvent::DownloadProgress { .. }))
        .skip(1)
        .collect();
    assert!(matches!(tail[0], InitEvent::Extracting { .. }));
    assert!(matches!(tail[1], InitEvent::TemplateReady { files: 2, .. }));
    assert!(matches!(tail[2], InitEvent::ManifestPatched { .. }));
}

#[tokio::test]
async fn test_answer_name_overrides_directory_name() {
    let server = MockServer::start().await;
    serve_archive(&server, template_archive(true), Duration::ZERO).await;
    let workspace = TempDir::new().unwrap();

    let mut prompter = ScriptedPrompter::new(ConflictChoice::Cancel)
        .with_answers(AnswerSet::with_defaults("published-name", Template::Vue));

    initializer_for(&server, Duration::from_secs(10))
        .run(
            &InitRequest::new("demo", false),
            workspace.path(),
            &mut prompter,
            &RecordingSink::default(),
        )
        .await
        .unwrap();

    let manifest = read_manifest(&workspace.path().join("demo"));
    assert_eq!(manifest["name"], "published-name");
    assert_eq!(manifest["version"], "1.0.0");
}

#[tokio::test]
async fn test_timeout_wins_and_leaves_nothing_behind() {
    let server = MockServer::start().await;
    serve_archive(&server, template_archive(true), Duration::from_secs(5)).await;
    let workspace = TempDir::new().unwrap();
    let mut prompter = ScriptedPrompter::new(ConflictChoice::Cancel);
    let sink = RecordingSink::default();

    let result = initializer_for(&server, Duration::from_millis(200))
        .run(
            &InitRequest::new("demo", false),
            workspace.path(),
            &mut prompter,
            &sink,
        )
        .await;

    let error = result.unwrap_err();
    assert!(matches!(
        error,
        AppError::Acquire(AcquireError::Timeout { .. })
    ));
    assert_eq!(error.category(), "timeout");
    assert!(!workspace.path().join("demo").exists());
    assert_eq!(std::fs::read_dir(workspace.path()).unwrap().count(), 0);

    let failure = sink
        .events()
        .into_iter()
        .find_map(|event| match event {
            InitEvent::DownloadFailed { hints, .. } => Some(hints),
            _ => None,
        })
        .unwrap();
    assert_eq!(failure.len(), 3);
    assert!(failure[0].contains("https://ghproxy.com/"));
}

#[tokio::test]
async fn test_timeout_during_extraction_leaves_nothing_behind() {
    let server = MockServer::start().await;
    serve_archive(&server, bulky_archive(40_000), Duration::ZERO).await;
    let workspace = TempDir::new().unwrap();
    let mut prompter = ScriptedPrompter::new(ConflictChoice::Cancel);

    let error = initializer_for(&server, Duration::from_millis(150))
        .run(
            &InitRequest::new("demo", false),
            workspace.path(),
            &mut prompter,
            &RecordingSink::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        AppError::Acquire(AcquireError::Timeout { .. })
    ));
    let leftovers: Vec<String> = std::fs::read_dir(workspace.path())
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(leftovers.is_empty(), "left behind: {:?}", leftovers);
}

#[tokio::test]
async fn test_cancel_makes_no_request_and_no_change() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let workspace = TempDir::new().unwrap();
    let existing = workspace.path().join("demo");
    std::fs::create_dir(&existing).unwrap();
    std::fs::write(existing.join("notes.txt"), "mine").unwrap();
    let mut prompter = ScriptedPrompter::new(ConflictChoice::Cancel);

    let outcome = initializer_for(&server, Duration::from_secs(10))
        .run(
            &InitRequest::new("demo", false),
            workspace.path(),
            &mut prompter,
            &RecordingSink::default(),
        )
        .await
        .unwrap();

    assert_eq!(outcome, InitOutcome::Cancelled);
    assert_eq!(prompter.conflicts_asked, 1);
    assert_eq!(prompter.answers_asked, 0);
    assert_eq!(std::fs::read_to_string(existing.join("notes.txt")).unwrap(), "mine");
}

#[tokio::test]
async fn test_force_replaces_existing_directory() {
    let server = MockServer::start().await;
    serve_archive(&server, template_archive(true), Duration::ZERO).await;

    let workspace = TempDir::new().unwrap();
    let existing = workspace.path().join("demo");
    std::fs::create_dir(&existing).unwrap();
    std::fs::write(existing.join("stale.txt"), "old").unwrap();
    let mut prompter = ScriptedPrompter::new(ConflictChoice::Cancel);
    let sink = RecordingSink::default();

    initializer_for(&server, Duration::from_secs(10))
        .run(
            &InitRequest::new("demo", true),
            workspace.path(),
            &mut prompter,
            &sink,
        )
        .await
        .unwrap();

    assert_eq!(prompter.conflicts_asked, 0);
    assert!(!existing.join("stale.txt").exists());
    assert!(existing.join("package.json").is_file());
    assert_eq!(
        sink.events().first(),
        Some(&InitEvent::TargetCleared {
            path: existing.clone()
        })
    );
}

#[tokio::test]
async fn test_overwrite_choice_replaces_existing_directory() {
    let server = MockServer::start().await;
    serve_archive(&server, template_archive(true), Duration::ZERO).await;

    let workspace = TempDir::new().unwrap();
    let existing = workspace.path().join("demo");
    std::fs::create_dir(&existing).unwrap();
    std::fs::write(existing.join("stale.txt"), "old").unwrap();
    let mut prompter = ScriptedPrompter::new(ConflictChoice::Overwrite);

    initializer_for(&server, Duration::from_secs(10))
        .run(
            &InitRequest::new("demo", false),
            workspace.path(),
            &mut prompter,
            &RecordingSink::default(),
        )
        .await
        .unwrap();

    assert_eq!(prompter.conflicts_asked, 1);
    assert!(!existing.join("stale.txt").exists());
    assert_eq!(read_manifest(&existing)["name"], "demo");
}

#[tokio::test]
async fn test_template_without_manifest_is_manifest_error() {
    let server = MockServer::start().await;
    serve_archive(&server, template_archive(false), Duration::ZERO).await;
    let workspace = TempDir::new().unwrap();
    let mut prompter = ScriptedPrompter::new(ConflictChoice::Cancel);

    let error = initializer_for(&server, Duration::from_secs(10))
        .run(
            &InitRequest::new("demo", false),
            workspace.path(),
            &mut prompter,
            &RecordingSink::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        AppError::Manifest(ManifestError::NotFound { .. })
    ));
    assert!(!error.is_acquisition_failure());
    assert!(workspace.path().join("demo/src/index.js").is_file());
}

#[tokio::test]
async fn test_server_error_is_acquisition_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let workspace = TempDir::new().unwrap();
    let mut prompter = ScriptedPrompter::new(ConflictChoice::Cancel);

    let error = initializer_for(&server, Duration::from_secs(10))
        .run(
            &InitRequest::new("demo", false),
            workspace.path(),
            &mut prompter,
            &RecordingSink::default(),
        )
        .await
        .unwrap_err();

    assert!(error.is_acquisition_failure());
    assert!(!workspace.path().join("demo").exists());
}
