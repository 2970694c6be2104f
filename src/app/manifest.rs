//! Project manifest patching
//!
//! The downloaded template's `package.json` is read, the four fields owned by
//! the answer set are overwritten, and the document is written back with
//! 2-space indentation. Every other field keeps its value and its position.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::app::models::AnswerSet;
use crate::constants::{files, manifest};
use crate::errors::{ManifestError, ManifestResult};

/// Parsed `package.json`
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Path of the manifest inside a project directory
    pub fn path_in(project_dir: &Path) -> PathBuf {
        project_dir.join(manifest::FILE_NAME)
    }

    /// Parse manifest content; `path` is only used for error messages
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Parse` for invalid JSON and
    /// `ManifestError::NotAnObject` when the top level is not an object
    pub fn parse(path: &Path, content: &[u8]) -> ManifestResult<Self> {
        let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);

        let value: Value = serde_json::from_slice(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Load the manifest at `path`
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` when the file is absent, or a read
    /// or parse error
    pub async fn load(path: &Path) -> ManifestResult<Self> {
        let content = tokio::fs::read(path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ManifestError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ManifestError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        debug!("Loaded {} bytes of manifest from {}", content.len(), path.display());
        Self::parse(path, &content)
    }

    /// Overwrite name, version, description and author
    pub fn apply(&mut self, answers: &AnswerSet) {
        let values = [
            answers.project_name.as_str(),
            answers.version.as_str(),
            answers.description.as_str(),
            answers.author.as_str(),
        ];

        for (key, value) in manifest::MANAGED_FIELDS.iter().zip(values) {
            self.fields
                .insert((*key).to_string(), Value::String(value.to_string()));
        }
    }

    /// Look up a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Top-level keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Serialize with the manifest indentation and a trailing newline
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Serialize` if serialization fails
    pub fn to_pretty_string(&self) -> ManifestResult<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(manifest::INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.fields
            .serialize(&mut serializer)
            .map_err(ManifestError::Serialize)?;
        buffer.push(b'\n');

        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the manifest to `path` atomically
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Write` if the temporary file cannot be written
    /// or renamed over `path`
    pub async fn save(&self, path: &Path) -> ManifestResult<()> {
        let content = self.to_pretty_string()?;
        let to_error = |source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(files::TEMP_FILE_SUFFIX);
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, content).await.map_err(to_error)?;
        if let Err(source) = tokio::fs::rename(&temp_path, path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(to_error(source));
        }

        Ok(())
    }
}

/// Patch the manifest of `project_dir` with `answers`
///
/// Returns the manifest path.
///
/// # Errors
///
/// Returns `ManifestError` if the manifest is missing, malformed, or cannot
/// be written back
pub async fn patch_manifest(project_dir: &Path, answers: &AnswerSet) -> ManifestResult<PathBuf> {
    let path = Manifest::path_in(project_dir);
    let mut manifest = Manifest::load(&path).await?;
    manifest.apply(answers);
    manifest.save(&path).await?;

    info!("Patched manifest {}", path.display());
    Ok(path)
}
