//! Target resolution
//!
//! Decides what happens to an existing destination before a template is
//! downloaded: keep going, wipe it, or stop without touching anything.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::app::prompt::Prompter;
use crate::errors::{TargetError, TargetResult};

/// Answer to the "destination already exists" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Remove the existing destination
    Overwrite,
    /// Leave it alone and stop
    Cancel,
}

impl ConflictChoice {
    /// Choices in the order they are offered
    pub const ALL: [ConflictChoice; 2] = [ConflictChoice::Overwrite, ConflictChoice::Cancel];
}

impl fmt::Display for ConflictChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictChoice::Overwrite => f.write_str("Overwrite"),
            ConflictChoice::Cancel => f.write_str("Cancel"),
        }
    }
}

/// Outcome of target resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetResolution {
    /// Nothing was there
    Vacant,
    /// Existing content was removed
    Cleared,
    /// User chose to stop; nothing was changed
    Cancelled,
}

impl TargetResolution {
    /// Whether initialization should continue
    pub fn should_proceed(&self) -> bool {
        !matches!(self, TargetResolution::Cancelled)
    }
}

/// Resolve the destination directory
///
/// An absent destination proceeds straight away. An existing one is removed
/// when `force_overwrite` is set, otherwise the prompter decides.
///
/// # Errors
///
/// Returns `TargetError` if the destination cannot be inspected or removed,
/// or if the prompt fails.
pub async fn resolve_target(
    destination: &Path,
    force_overwrite: bool,
    prompter: &mut dyn Prompter,
) -> TargetResult<TargetResolution> {
    if !path_exists(destination).await? {
        debug!("Target {} does not exist", destination.display());
        return Ok(TargetResolution::Vacant);
    }

    if !force_overwrite {
        match prompter.resolve_conflict(destination)? {
            ConflictChoice::Cancel => {
                info!("User cancelled; leaving {} untouched", destination.display());
                return Ok(TargetResolution::Cancelled);
            }
            ConflictChoice::Overwrite => {}
        }
    }

    info!("Removing existing target {}", destination.display());
    remove_path(destination).await?;
    Ok(TargetResolution::Cleared)
}

/// Existence check that also sees dangling symlinks
async fn path_exists(path: &Path) -> TargetResult<bool> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(TargetError::Inspect {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn remove_path(path: &Path) -> TargetResult<()> {
    let to_error = |source| TargetError::Remove {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::symlink_metadata(path).await.map_err(to_error)?;
    if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await.map_err(to_error)
    } else {
        tokio::fs::remove_file(path).await.map_err(to_error)
    }
}
