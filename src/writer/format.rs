//! Line rendering for the notification log.
//!
//! # Formats
//! - `detailed`: `{ts} - INFO - Container: {c} | Keyword: {k} | Message: {m}`
//! - `simple`: `{ts} - {c} | {k} | {m}`
//! - `json`: one JSON object per line, raw payload embedded under `raw_data`
//!
//! # Design Decisions
//! - Parsing never fails: unknown names fall back to `detailed`
//! - Every rendered line ends with exactly one `\n`

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::notification::NotificationRecord;

/// Level written into every line. Notifications are always logged at INFO.
const LEVEL: &str = "INFO";

/// Text encoding of the notification log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LogFormat {
    #[default]
    Detailed,
    Simple,
    Json,
}

impl LogFormat {
    /// Lenient, case-insensitive parse. Unknown values map to `Detailed`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => LogFormat::Simple,
            "json" => LogFormat::Json,
            _ => LogFormat::Detailed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Detailed => "detailed",
            LogFormat::Simple => "simple",
            LogFormat::Json => "json",
        }
    }

    /// Render a record as a single newline-terminated line.
    pub fn render(&self, record: &NotificationRecord) -> Result<String, serde_json::Error> {
        let timestamp = record.timestamp_string();
        let line = match self {
            LogFormat::Detailed => format!(
                "{} - {} - Container: {} | Keyword: {} | Message: {}\n",
                timestamp, LEVEL, record.container, record.keyword, record.message
            ),
            LogFormat::Simple => format!(
                "{} - {} | {} | {}\n",
                timestamp, record.container, record.keyword, record.message
            ),
            LogFormat::Json => {
                let line = JsonLine {
                    timestamp: &timestamp,
                    level: LEVEL,
                    message: JsonNotification {
                        timestamp: &timestamp,
                        container: &record.container,
                        keyword: &record.keyword,
                        message: &record.message,
                        raw_data: &record.raw_payload,
                    },
                };
                let mut encoded = serde_json::to_string(&line)?;
                encoded.push('\n');
                encoded
            }
        };
        Ok(line)
    }
}

impl From<String> for LogFormat {
    fn from(value: String) -> Self {
        LogFormat::parse_lenient(&value)
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Field order is part of the on-disk format.
#[derive(Serialize)]
struct JsonLine<'a> {
    timestamp: &'a str,
    level: &'static str,
    message: JsonNotification<'a>,
}

#[derive(Serialize)]
struct JsonNotification<'a> {
    timestamp: &'a str,
    container: &'a str,
    keyword: &'a str,
    message: &'a str,
    raw_data: &'a Value,
}
