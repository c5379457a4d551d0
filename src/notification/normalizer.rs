//! Payload normalization.
//!
//! # Responsibilities
//! - Parse the raw webhook body
//! - Reject anything that is not a JSON object
//! - Fill missing fields with placeholders
//!
//! # Design Decisions
//! - Permissive: any JSON object is accepted, whatever keys it carries
//! - The capture time comes from the local clock, never from the payload

use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use thiserror::Error;

use super::record::NotificationRecord;

/// Errors raised while normalizing a webhook body.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Body is not valid JSON.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Body is valid JSON but not an object.
    #[error("malformed payload: expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Normalize a JSON body, stamping it with the current time.
pub fn normalize(body: &[u8]) -> Result<NotificationRecord, NormalizeError> {
    normalize_at(body, Local::now())
}

/// Normalize a JSON body with an explicit capture time.
pub fn normalize_at(
    body: &[u8],
    timestamp: DateTime<Local>,
) -> Result<NotificationRecord, NormalizeError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(object) => Ok(NotificationRecord::from_object(object, timestamp)),
        other => Err(NormalizeError::NotAnObject(kind_of(&other))),
    }
}

/// Normalize a non-JSON body by treating the whole text as the message.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn normalize_text(body: &[u8]) -> NotificationRecord {
    let mut object = Map::new();
    object.insert(
        "message".to_string(),
        Value::String(String::from_utf8_lossy(body).into_owned()),
    );
    NotificationRecord::from_object(object, Local::now())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
