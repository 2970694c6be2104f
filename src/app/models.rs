//! Data models for project initialization
//!
//! `InitRequest` comes from the command line, `AnswerSet` from the prompts,
//! and `Template` names one of the archives the tool knows how to fetch.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::manifest;
use crate::errors::{TargetError, TargetResult};

/// Project templates that can be scaffolded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Vue front-end project
    Vue,
    /// React front-end project
    React,
    /// Node.js project
    Node,
}

impl Template {
    /// Every template, in the order they are offered
    pub const ALL: [Template; 3] = [Template::Vue, Template::React, Template::Node];

    /// Identifier used in prompts and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Vue => "vue",
            Template::React => "react",
            Template::Node => "node",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    /// Directory name of the new project, relative to the working directory
    pub project_name: String,
    /// Remove an existing destination without asking
    pub force_overwrite: bool,
}

impl InitRequest {
    /// Create a new request
    pub fn new(project_name: impl Into<String>, force_overwrite: bool) -> Self {
        Self {
            project_name: project_name.into(),
            force_overwrite,
        }
    }

    /// Check that the project name names a directory below the working directory
    pub fn validate(&self) -> TargetResult<()> {
        let invalid = |reason: &str| TargetError::InvalidProjectName {
            name: self.project_name.clone(),
            reason: reason.to_string(),
        };

        if self.project_name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }

        let path = Path::new(&self.project_name);
        if path.is_absolute() || path.has_root() {
            return Err(invalid("name must be a relative path"));
        }

        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                Component::CurDir if path.components().count() > 1 => {}
                _ => return Err(invalid("name must not refer to the current or a parent directory")),
            }
        }

        Ok(())
    }

    /// Destination directory for this request
    pub fn destination(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.project_name)
    }
}

/// Answers collected from the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    /// Package name written to the manifest
    pub project_name: String,
    /// Package version
    pub version: String,
    /// Package description (may be empty)
    pub description: String,
    /// Package author (may be empty)
    pub author: String,
    /// Template to download
    pub template: Template,
}

impl AnswerSet {
    /// Answers with the defaults offered by the prompts
    pub fn with_defaults(project_name: impl Into<String>, template: Template) -> Self {
        Self {
            project_name: project_name.into(),
            version: manifest::DEFAULT_VERSION.to_string(),
            description: String::new(),
            author: String::new(),
            template,
        }
    }
}

/// Check a version answer; only emptiness and whitespace are rejected
pub fn validate_version(version: &str) -> Result<(), String> {
    if version.trim().is_empty() {
        return Err("Version cannot be empty".to_string());
    }
    if version.chars().any(char::is_whitespace) {
        return Err("Version cannot contain whitespace".to_string());
    }
    Ok(())
}
