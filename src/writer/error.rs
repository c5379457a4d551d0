//! Log writer error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while appending to the notification log.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Parent directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Active log file could not be opened or inspected.
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the line failed (disk full, permission denied, ...).
    #[error("failed to write to log file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Flushing the line to storage failed.
    #[error("failed to sync log file {path}: {source}")]
    Sync {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A rotation step failed; the line was not written.
    #[error("log rotation failed at {path}: {source}")]
    Rotate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing failed and the partial line could not be truncated away.
    #[error("failed to roll back partial write to {path}: {source} (after: {cause})")]
    Rollback {
        path: PathBuf,
        cause: Box<WriteError>,
        source: std::io::Error,
    },

    /// The line could not be encoded.
    #[error("failed to encode log line: {0}")]
    Encode(#[from] serde_json::Error),

    /// A previous writer panicked while holding the file lock.
    #[error("log writer lock poisoned")]
    Poisoned,
}

/// Result type for log writer operations.
pub type WriteResult<T> = Result<T, WriteError>;
