//! Size-based log rotation.
//!
//! # Layout
//! ```text
//! notifications.log      active file
//! notifications.log.1    most recent backup
//! ...
//! notifications.log.N    oldest backup (N = backup_count)
//! ```
//!
//! # Design Decisions
//! - Each shift is a single `rename`, so a crash loses at most one step
//! - Backups above `backup_count` (e.g. after lowering it) are pruned on rotation
//! - `backup_count == 0` truncates in place instead of keeping history

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use super::error::{WriteError, WriteResult};

/// Thresholds controlling when and how the active file rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub enabled: bool,
    pub max_bytes: u64,
    pub backup_count: u32,
}

impl RotationPolicy {
    /// Rotation that never triggers.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_bytes: 0,
            backup_count: 0,
        }
    }

    /// Whether appending `incoming` bytes to a file of `current` bytes must rotate first.
    ///
    /// An empty file never rotates, so a single oversized line is still written.
    pub fn should_rotate(&self, current: u64, incoming: u64) -> bool {
        self.enabled && self.max_bytes > 0 && current > 0 && current.saturating_add(incoming) > self.max_bytes
    }
}

/// Path of the `index`-th backup of `path` (`path.index`).
pub fn backup_path(path: &Path, index: u32) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// Existing numbered backups of `path`, sorted by index.
///
/// A missing directory yields an empty list.
pub fn list_backups(path: &Path) -> io::Result<Vec<(u32, PathBuf)>> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(Vec::new());
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let prefix = format!("{}.", file_name);
    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(index) = name
            .to_str()
            .and_then(|n| n.strip_prefix(&prefix))
            .filter(|suffix| suffix.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|suffix| suffix.parse::<u32>().ok())
        else {
            continue;
        };
        if index == 0 || !entry.file_type()?.is_file() {
            continue;
        }
        backups.push((index, backup_path(path, index)));
    }
    backups.sort_by_key(|(index, _)| *index);
    Ok(backups)
}

/// Rotate `path`, keeping at most `backup_count` backups.
pub fn rotate(path: &Path, backup_count: u32) -> WriteResult<()> {
    if backup_count == 0 {
        return truncate(path);
    }

    remove_if_exists(&backup_path(path, backup_count))?;

    for index in (1..backup_count).rev() {
        let from = backup_path(path, index);
        if from.exists() {
            rename(&from, &backup_path(path, index + 1))?;
        }
    }

    if path.exists() {
        rename(path, &backup_path(path, 1))?;
    }

    prune_above(path, backup_count)?;

    tracing::debug!(path = %path.display(), backup_count, "Log file rotated");
    Ok(())
}

/// Delete backups numbered above `backup_count`.
fn prune_above(path: &Path, backup_count: u32) -> WriteResult<()> {
    let backups = list_backups(path).map_err(|source| WriteError::Rotate {
        path: path.to_path_buf(),
        source,
    })?;
    for (_, stale) in backups.into_iter().filter(|(index, _)| *index > backup_count) {
        remove_if_exists(&stale)?;
    }
    Ok(())
}

fn truncate(path: &Path) -> WriteResult<()> {
    OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map(|_| ())
        .or_else(|e| if e.kind() == io::ErrorKind::NotFound { Ok(()) } else { Err(e) })
        .map_err(|source| WriteError::Rotate {
            path: path.to_path_buf(),
            source,
        })
}

fn rename(from: &Path, to: &Path) -> WriteResult<()> {
    fs::rename(from, to).map_err(|source| WriteError::Rotate {
        path: from.to_path_buf(),
        source,
    })
}

fn remove_if_exists(path: &Path) -> WriteResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(WriteError::Rotate {
            path: path.to_path_buf(),
            source,
        }),
    }
}
