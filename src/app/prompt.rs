//! Interactive questions asked during `init`
//!
//! The initialization flow only depends on the [`Prompter`] trait; the
//! terminal implementation is built on `dialoguer`.

use std::path::Path;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use tracing::debug;

use crate::app::models::{validate_version, AnswerSet, Template};
use crate::app::target::ConflictChoice;
use crate::constants::manifest;
use crate::errors::{PromptError, PromptResult};

/// Source of user decisions
pub trait Prompter {
    /// Ask what to do with an existing destination
    fn resolve_conflict(&mut self, target: &Path) -> PromptResult<ConflictChoice>;

    /// Collect project metadata; `project_name` is offered as the default name
    fn collect_answers(&mut self, project_name: &str) -> PromptResult<AnswerSet>;
}

/// Prompter that asks on the terminal
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    /// Create a prompter with the colorful theme
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn ensure_interactive(&self) -> PromptResult<()> {
        if atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stderr) {
            Ok(())
        } else {
            Err(PromptError::NotInteractive)
        }
    }

    fn ask_text(&self, prompt: &str, default: Option<&str>) -> PromptResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(default.is_none());
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?.trim().to_string())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn resolve_conflict(&mut self, target: &Path) -> PromptResult<ConflictChoice> {
        self.ensure_interactive()?;

        let index = Select::with_theme(&self.theme)
            .with_prompt(format!(
                "Target directory {} already exists. Pick an action",
                target.display()
            ))
            .items(&ConflictChoice::ALL)
            .default(0)
            .interact()?;

        let choice = ConflictChoice::ALL[index];
        debug!("Conflict resolved with {}", choice);
        Ok(choice)
    }

    fn collect_answers(&mut self, project_name: &str) -> PromptResult<AnswerSet> {
        self.ensure_interactive()?;

        let name = self.ask_text("Project name", Some(project_name))?;

        let version = Input::<String>::with_theme(&self.theme)
            .with_prompt("Project version")
            .default(manifest::DEFAULT_VERSION.to_string())
            .validate_with(|input: &String| validate_version(input))
            .interact_text()?
            .trim()
            .to_string();

        let description = self.ask_text("Project description", None)?;
        let author = self.ask_text("Author", None)?;

        let index = Select::with_theme(&self.theme)
            .with_prompt("Select a template")
            .items(&Template::ALL)
            .default(0)
            .interact()?;

        Ok(AnswerSet {
            project_name: name,
            version,
            description,
            author,
            template: Template::ALL[index],
        })
    }
}
