//! Serialized appends to the active log file.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::{WriteError, WriteResult};
use super::format::LogFormat;
use super::rotation::{self, RotationPolicy};
use crate::notification::NotificationRecord;

/// Result of a successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Bytes of the rendered line.
    pub bytes_written: u64,
    /// Whether the file was rotated before this line was written.
    pub rotated: bool,
    /// Size of the active file after the append.
    pub file_size: u64,
}

/// Single-writer handle on the notification log.
///
/// Every append holds `lock` across size check, rotation, write and sync, so
/// concurrent callers never observe a half-rotated file or interleave lines.
#[derive(Debug)]
pub struct LogWriter {
    path: PathBuf,
    policy: RotationPolicy,
    lock: Mutex<()>,
}

impl LogWriter {
    /// Open the log at `path`, creating the parent directory and the file if needed.
    pub fn open(path: impl Into<PathBuf>, policy: RotationPolicy) -> WriteResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Surface path and permission problems at startup.
        open_append(&path)?;

        tracing::debug!(
            path = %path.display(),
            rotation = policy.enabled,
            max_bytes = policy.max_bytes,
            backup_count = policy.backup_count,
            "Log writer opened"
        );

        Ok(Self {
            path,
            policy,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Render `record` in `format` and append it.
    pub fn append(&self, record: &NotificationRecord, format: LogFormat) -> WriteResult<AppendOutcome> {
        let line = format.render(record)?;
        self.append_line(&line)
    }

    /// Append an already-rendered, newline-terminated line.
    pub fn append_line(&self, line: &str) -> WriteResult<AppendOutcome> {
        let _guard = self.lock.lock().map_err(|_| WriteError::Poisoned)?;

        let incoming = line.len() as u64;
        let current = self.current_size()?;

        let rotated = self.policy.should_rotate(current, incoming);
        if rotated {
            rotation::rotate(&self.path, self.policy.backup_count)?;
        }

        let len_before = if rotated { 0 } else { current };
        let file = open_append(&self.path)?;
        write_line(&file, &file, line.as_bytes(), len_before, &self.path)?;

        Ok(AppendOutcome {
            bytes_written: incoming,
            rotated,
            file_size: if rotated { incoming } else { current + incoming },
        })
    }

    /// Size of the active file as reported by the filesystem; 0 when it is missing.
    pub fn current_size(&self) -> WriteResult<u64> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(source) => Err(WriteError::Open {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Write `line` through `sink` and sync `file`. On failure the file is cut back
/// to `len_before` so no fragment of the line survives.
fn write_line<W: Write>(
    file: &fs::File,
    mut sink: W,
    line: &[u8],
    len_before: u64,
    path: &Path,
) -> WriteResult<()> {
    let result = sink
        .write_all(line)
        .map_err(|source| WriteError::Write {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|()| {
            file.sync_data().map_err(|source| WriteError::Sync {
                path: path.to_path_buf(),
                source,
            })
        });

    let Err(cause) = result else {
        return Ok(());
    };
    match file.set_len(len_before) {
        Ok(()) => Err(cause),
        Err(source) => {
            tracing::error!(path = %path.display(), error = %cause, "Partial line left in log file");
            Err(WriteError::Rollback {
                path: path.to_path_buf(),
                cause: Box::new(cause),
                source,
            })
        }
    }
}

fn open_append(path: &Path) -> WriteResult<fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| WriteError::Open {
            path: path.to_path_buf(),
            source,
        })
}
