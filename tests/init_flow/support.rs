//! Shared fixtures for the init flow tests

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use suckson_cli::app::{
    AnswerSet, ConflictChoice, FetcherConfig, InitEvent, Initializer, Prompter, Template,
    TemplateFetcher, TemplateSources,
};
use suckson_cli::errors::PromptResult;
use wiremock::MockServer;
use zip::write::FileOptions;
use zip::ZipWriter;

pub const ARCHIVE_ROUTE: &str = "/suckson/suckson_admin/archive/main.zip";

pub const TEMPLATE_MANIFEST: &str = r#"{
  "name": "suckson-admin",
  "version": "0.0.1",
  "private": true,
  "scripts": {
    "dev": "vite"
  }
}
"#;

/// Zip laid out the way GitHub serves branch archives
pub fn template_archive(with_manifest: bool) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    writer.add_directory("suckson_admin-main/", options).unwrap();
    if with_manifest {
        writer
            .start_file("suckson_admin-main/package.json", options)
            .unwrap();
        writer.write_all(TEMPLATE_MANIFEST.as_bytes()).unwrap();
    }
    writer
        .start_file("suckson_admin-main/src/index.js", options)
        .unwrap();
    writer.write_all(b"console.log('hello');\n").unwrap();

    writer.finish().unwrap().into_inner()
}

/// Template with many small files; slow to unpack
pub fn bulky_archive(file_count: usize) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    writer
        .start_file("suckson_admin-main/package.json", options)
        .unwrap();
    writer.write_all(TEMPLATE_MANIFEST.as_bytes()).unwrap();
    for i in 0..file_count {
        writer
            .start_file(format!("suckson_admin-main/src/module_{}.js", i), options)
            .unwrap();
        writer.write_all(b"export {};\n").unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// Initializer whose templates all point at `server`
pub fn initializer_for(server: &MockServer, timeout: Duration) -> Initializer {
    let url = format!("{}{}", server.uri(), ARCHIVE_ROUTE);
    let fetcher = TemplateFetcher::new(FetcherConfig {
        timeout,
        sources: TemplateSources {
            vue: url.clone(),
            react: url.clone(),
            node: url,
        },
        ..Default::default()
    })
    .unwrap();
    Initializer::new(fetcher)
}

/// Prompter answering from a script
pub struct ScriptedPrompter {
    pub conflict_choice: ConflictChoice,
    pub answers: Option<AnswerSet>,
    pub conflicts_asked: usize,
    pub answers_asked: usize,
}

impl ScriptedPrompter {
    pub fn new(conflict_choice: ConflictChoice) -> Self {
        Self {
            conflict_choice,
            answers: None,
            conflicts_asked: 0,
            answers_asked: 0,
        }
    }

    pub fn with_answers(mut self, answers: AnswerSet) -> Self {
        self.answers = Some(answers);
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn resolve_conflict(&mut self, _target: &Path) -> PromptResult<ConflictChoice> {
        self.conflicts_asked += 1;
        Ok(self.conflict_choice)
    }

    fn collect_answers(&mut self, project_name: &str) -> PromptResult<AnswerSet> {
        self.answers_asked += 1;
        Ok(self
            .answers
            .clone()
            .unwrap_or_else(|| AnswerSet::with_defaults(project_name, Template::Node)))
    }
}

/// Event sink that records everything it receives
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<InitEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<InitEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl suckson_cli::app::EventSink for RecordingSink {
    fn emit(&self, event: InitEvent) {
        self.events.lock().unwrap().push(event);
    }
}
