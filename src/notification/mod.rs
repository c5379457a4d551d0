//! Notification intake.
//!
//! # Data Flow
//! ```text
//! webhook body (bytes)
//!     → normalizer.rs (parse, reject non-objects)
//!     → record.rs (fill defaults, stamp capture time)
//!     → NotificationRecord handed to the log writer
//! ```

pub mod normalizer;
pub mod record;

pub use normalizer::{normalize, normalize_at, normalize_text, NormalizeError};
pub use record::{NotificationRecord, UNKNOWN};
