//! Notification log writer subsystem.
//!
//! # Data Flow
//! ```text
//! NotificationRecord
//!     → format.rs (render detailed | simple | json line)
//!     → file.rs (lock, stat active file)
//!     → rotation.rs (shift backups if the line would overflow)
//!     → file.rs (append, sync, unlock)
//! ```
//!
//! # Design Decisions
//! - One mutex per log file; the whole check-rotate-write sequence runs under it
//! - File size is read from the filesystem on every append, never cached
//! - Every failure is returned to the caller, nothing is dropped silently

pub mod error;
pub mod file;
pub mod format;
pub mod rotation;

pub use error::{WriteError, WriteResult};
pub use file::{AppendOutcome, LogWriter};
pub use format::LogFormat;
pub use rotation::RotationPolicy;
