//! Canonical notification record.

use chrono::{DateTime, Local};
use serde_json::{Map, Value};

/// Placeholder for absent `container` / `keyword` fields.
pub const UNKNOWN: &str = "unknown";

/// Timestamp layout written to the log: local ISO-8601 with microseconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A normalized, field-complete notification.
///
/// Constructed per request and dropped once its rendered line has been appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    /// Receipt time, assigned by the helper rather than taken from the payload.
    pub timestamp: DateTime<Local>,
    pub container: String,
    pub keyword: String,
    pub message: String,
    /// The original JSON object, verbatim.
    pub raw_payload: Value,
}

impl NotificationRecord {
    /// Build a record from an already-parsed object and a capture time.
    pub fn from_object(object: Map<String, Value>, timestamp: DateTime<Local>) -> Self {
        let container = first_text(&object, &["container"]).unwrap_or_else(|| UNKNOWN.to_string());
        let keyword = first_text(&object, &["keyword", "keywords"]).unwrap_or_else(|| UNKNOWN.to_string());
        let message = first_text(&object, &["message", "title", "body"]).unwrap_or_default();

        Self {
            timestamp,
            container,
            keyword,
            message,
            raw_payload: Value::Object(object),
        }
    }

    /// Timestamp as written to the log file.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Text of the first key present, in priority order.
fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| object.get(*key)).map(as_text)
}

/// Strings pass through; every other value uses its compact JSON text.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
