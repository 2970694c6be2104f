//! Template archive extraction
//!
//! Archives are unpacked into a hidden staging directory next to the
//! destination and renamed into place once every entry has been written.
//! Unpacking and the rename run as one blocking task. When the deadline
//! passes first, the task is told to stop and is awaited, so the staging
//! directory is gone by the time the caller sees the failure. A lost race
//! therefore never leaves a half-populated destination behind.

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tempfile::TempDir;
use tokio::time::Instant;
use tracing::debug;
use zip::ZipArchive;

use crate::constants::acquisition;
use crate::errors::{AcquireError, AcquireResult};

/// Sets the shared flag when the owning future is dropped
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Extract a zip archive into `destination` before `deadline`
///
/// A single top-level directory shared by every entry (as in GitHub branch
/// archives) is stripped. Returns the number of files written.
///
/// # Errors
///
/// Returns `AcquireError::Cancelled` if the deadline passes first; nothing is
/// left on disk in that case. Otherwise returns `AcquireError` if the archive
/// is invalid or empty, an entry path escapes the destination, the
/// destination already exists, or an I/O operation fails.
pub async fn extract_archive(
    bytes: Vec<u8>,
    destination: &Path,
    deadline: Instant,
) -> AcquireResult<usize> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent).await?;

    let staging = tempfile::Builder::new()
        .prefix(acquisition::STAGING_PREFIX)
        .tempdir_in(&parent)?;
    debug!("Extracting into staging directory {}", staging.path().display());

    let cancelled = Arc::new(AtomicBool::new(false));
    let _guard = CancelOnDrop(Arc::clone(&cancelled));

    let flag = Arc::clone(&cancelled);
    let target = destination.to_path_buf();
    let mut task = tokio::task::spawn_blocking(move || -> AcquireResult<usize> {
        let files = unpack(&bytes, staging.path(), &flag)?;
        install(staging, &target, &flag)?;
        Ok(files)
    });

    let joined = match tokio::time::timeout_at(deadline, &mut task).await {
        Ok(joined) => joined,
        Err(_) => {
            debug!("Deadline passed during extraction; waiting for the task to stop");
            cancelled.store(true, Ordering::SeqCst);
            if let Ok(Ok(_)) = task.await {
                // Installed between the deadline and the flag
                tokio::fs::remove_dir_all(destination).await?;
            }
            return Err(AcquireError::Cancelled);
        }
    };

    let files = joined.map_err(|e| AcquireError::TaskFailed(e.to_string()))??;
    debug!("Extracted {} files into {}", files, destination.display());
    Ok(files)
}

/// Move the staged tree to `destination`; the staging directory is removed
/// on every failure path
fn install(staging: TempDir, destination: &Path, cancelled: &AtomicBool) -> AcquireResult<()> {
    if cancelled.load(Ordering::SeqCst) {
        return Err(AcquireError::Cancelled);
    }

    if fs::symlink_metadata(destination).is_ok() {
        return Err(AcquireError::DestinationExists {
            path: destination.to_path_buf(),
        });
    }

    let staged = staging.keep();
    if let Err(e) = fs::rename(&staged, destination) {
        let _ = fs::remove_dir_all(&staged);
        return Err(AcquireError::Io(e));
    }

    Ok(())
}

/// Write every archive entry below `root`
fn unpack(bytes: &[u8], root: &Path, cancelled: &AtomicBool) -> AcquireResult<usize> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    if archive.len() == 0 {
        return Err(AcquireError::EmptyArchive);
    }

    let strip = shared_root(archive.file_names());
    let mut files = 0;

    for index in 0..archive.len() {
        if cancelled.load(Ordering::SeqCst) {
            return Err(AcquireError::Cancelled);
        }

        let mut entry = archive.by_index(index)?;
        let name = entry
            .enclosed_name()
            .map(Path::to_path_buf)
            .ok_or_else(|| AcquireError::UnsafeEntry {
                name: entry.name().to_string(),
            })?;

        let relative = match strip.as_deref() {
            Some(prefix) => name
                .strip_prefix(prefix)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| name.clone()),
            None => name,
        };
        if relative.as_os_str().is_empty() {
            continue;
        }

        let out_path = root.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                // Owner keeps read/write so the manifest can be patched
                let mode = (mode & 0o777) | 0o600;
                fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))?;
            }
        }

        files += 1;
    }

    Ok(files)
}

/// Top-level directory shared by every entry, if there is exactly one and
/// something lives inside it
fn shared_root<'a>(names: impl Iterator<Item = &'a str>) -> Option<PathBuf> {
    let mut root: Option<&str> = None;
    let mut nested = false;

    for name in names {
        let (first, rest) = name.split_once('/')?;
        if first.is_empty() || first == "." || first == ".." {
            return None;
        }
        match root {
            None => root = Some(first),
            Some(existing) if existing != first => return None,
            Some(_) => {}
        }
        if !rest.is_empty() {
            nested = true;
        }
    }

    root.filter(|_| nested).map(PathBuf::from)
}
