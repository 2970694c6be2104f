//! Error types for suckson
//!
//! Each stage of `init` has its own error enum; `AppError` rolls them up for
//! the CLI, which reports a single failure line and exits non-zero.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Destination directory errors
#[derive(Error, Debug)]
pub enum TargetError {
    /// Project name cannot be turned into a destination directory
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// Destination could not be inspected
    #[error("Cannot inspect target directory {path}: {source}")]
    Inspect {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Existing destination could not be removed
    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The overwrite prompt failed
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Interactive prompt errors
#[derive(Error, Debug)]
pub enum PromptError {
    /// Prompts need a terminal on stdin
    #[error("An interactive terminal is required to answer project questions")]
    NotInteractive,

    /// Terminal interaction failed
    #[error("Prompt failed: {0}")]
    Interaction(#[from] dialoguer::Error),
}

/// Template acquisition errors
#[derive(Error, Debug)]
pub enum AcquireError {
    /// Download and extraction did not finish within the budget
    #[error(
        "Template download timed out after {}s, please check your network connection",
        .limit.as_secs_f32()
    )]
    Timeout { limit: Duration },

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Archive URL could not be parsed
    #[error("Invalid archive URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Archive does not exist on the server
    #[error("Template archive not found: {url}")]
    NotFound { url: String },

    /// Server refused the request
    #[error("Access to template archive denied: {url}")]
    Forbidden { url: String },

    /// Server returned another error status
    #[error("Server error: HTTP {status} for {url}")]
    ServerError { status: u16, url: String },

    /// Body shorter than the announced length
    #[error("Incomplete download: received {received} bytes, expected {expected} bytes")]
    IncompleteDownload { received: u64, expected: u64 },

    /// Archive exceeds the size limit
    #[error("Template archive exceeds the {limit} byte limit")]
    ArchiveTooLarge { limit: u64 },

    /// Archive could not be read
    #[error("Invalid template archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Archive contains no entries
    #[error("Template archive is empty")]
    EmptyArchive,

    /// Archive entry would be written outside the destination
    #[error("Template archive contains an unsafe path: {name}")]
    UnsafeEntry { name: String },

    /// Destination appeared before extraction finished
    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// I/O error while writing the template
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Extraction was abandoned because the race was lost
    #[error("Template extraction cancelled")]
    Cancelled,

    /// Extraction task panicked or was aborted
    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}

/// Project manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No manifest at the expected path
    #[error("Manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Manifest could not be read
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest is not valid JSON
    #[error("Manifest {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Manifest JSON is not an object
    #[error("Manifest {path} must contain a JSON object")]
    NotAnObject { path: PathBuf },

    /// Manifest could not be serialized
    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Manifest could not be written back
    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file is missing
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Failed to parse config file {path}: {source}")]
    InvalidFormat {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Target resolution error
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Prompt error
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Acquisition error
    #[error("Failed to download template: {0}")]
    Acquire(#[from] AcquireError),

    /// Manifest error
    #[error("Template downloaded but is not a valid project template: {0}")]
    Manifest(#[from] ManifestError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the failure happened while fetching the template
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, AppError::Acquire(_))
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Target(_) => "target",
            AppError::Prompt(_) => "prompt",
            AppError::Acquire(AcquireError::Timeout { .. }) => "timeout",
            AppError::Acquire(_) => "acquisition",
            AppError::Manifest(ManifestError::Write { .. }) => "manifest-write",
            AppError::Manifest(_) => "manifest",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Target resolution result type alias
pub type TargetResult<T> = std::result::Result<T, TargetError>;

/// Prompt result type alias
pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Acquisition result type alias
pub type AcquireResult<T> = std::result::Result<T, AcquireError>;

/// Manifest result type alias
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
