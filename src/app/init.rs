//! Project initialization flow
//!
//! Target resolution → answers → template acquisition → manifest patch.
//! Each stage finishes before the next one starts and nothing is retried.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::acquire::TemplateFetcher;
use crate::app::events::{EventSink, InitEvent};
use crate::app::manifest::patch_manifest;
use crate::app::models::{AnswerSet, InitRequest};
use crate::app::prompt::Prompter;
use crate::app::target::{resolve_target, TargetResolution};
use crate::errors::Result;

/// Details of a finished initialization
#[derive(Debug, Clone, PartialEq)]
pub struct InitSummary {
    /// Directory the project was created in
    pub destination: PathBuf,
    /// Patched manifest
    pub manifest_path: PathBuf,
    /// Answers the manifest was patched with
    pub answers: AnswerSet,
    /// Number of files extracted from the template
    pub files: usize,
}

/// How an `init` run ended
#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    /// User declined to overwrite; nothing was changed
    Cancelled,
    /// Project created
    Completed(InitSummary),
}

/// Runs the initialization flow
#[derive(Debug, Clone)]
pub struct Initializer {
    fetcher: TemplateFetcher,
}

impl Initializer {
    /// Create an initializer that downloads with `fetcher`
    pub fn new(fetcher: TemplateFetcher) -> Self {
        Self { fetcher }
    }

    /// Initialize the project described by `request` below `base_dir`
    ///
    /// # Errors
    ///
    /// Returns `AppError` for an invalid request, a failed prompt or removal,
    /// a failed download, or an unusable manifest. None of them are retried.
    pub async fn run(
        &self,
        request: &InitRequest,
        base_dir: &Path,
        prompter: &mut dyn Prompter,
        sink: &dyn EventSink,
    ) -> Result<InitOutcome> {
        request.validate()?;
        let destination = request.destination(base_dir);

        match resolve_target(&destination, request.force_overwrite, prompter).await? {
            TargetResolution::Cancelled => return Ok(InitOutcome::Cancelled),
            TargetResolution::Cleared => sink.emit(InitEvent::TargetCleared {
                path: destination.clone(),
            }),
            TargetResolution::Vacant => {}
        }

        let answers = prompter.collect_answers(&request.project_name)?;
        info!(
            "Initializing '{}' from template '{}'",
            answers.project_name, answers.template
        );

        let files = self
            .fetcher
            .acquire(answers.template, &destination, sink)
            .await?;

        let manifest_path = patch_manifest(&destination, &answers).await?;
        sink.emit(InitEvent::ManifestPatched {
            path: manifest_path.clone(),
        });

        Ok(InitOutcome::Completed(InitSummary {
            destination,
            manifest_path,
            answers,
            files,
        }))
    }
}
