//! Endpoint handlers.
//!
//! - `POST /webhook`: normalize, append, acknowledge
//! - `GET /health`: liveness only, never touches the log file
//! - `GET /config`: effective configuration captured at startup
//! - `GET /stats`: counters plus fresh filesystem metadata

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::response::{Ack, ApiError};
use crate::http::server::AppState;
use crate::notification::{normalize, normalize_text};
use crate::observability::metrics;
use crate::stats::StatsSnapshot;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub log_file: PathBuf,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// Configuration as reported by `GET /config`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigView {
    pub port: u16,
    pub host: String,
    pub log_file: PathBuf,
    pub log_format: &'static str,
    pub log_rotation: bool,
    pub max_log_size: String,
    pub max_log_size_bytes: Option<u64>,
    pub backup_count: u32,
    pub log_level: String,
}

pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Ack>, ApiError> {
    let request_id = request_id(&headers).to_string();

    let record = if declares_non_json(&headers) {
        normalize_text(&body)
    } else {
        normalize(&body).map_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected webhook payload");
            metrics::record_rejected();
            e
        })?
    };

    state.counters.record_received();
    metrics::record_received();

    let format = state.config.log.format;
    let writer = Arc::clone(&state.writer);
    let start = Instant::now();
    let (record, result) = tokio::task::spawn_blocking(move || {
        let result = writer.append(&record, format);
        (record, result)
    })
    .await
    .map_err(|e| {
        state.counters.record_write_error();
        metrics::record_write_error();
        tracing::error!(request_id = %request_id, error = %e, "Log append task failed");
        ApiError::Internal(e.to_string())
    })?;

    match result {
        Ok(outcome) => {
            state.counters.record_logged(outcome.rotated);
            metrics::record_logged(format, &outcome, start);
            tracing::info!(
                request_id = %request_id,
                container = %record.container,
                keyword = %record.keyword,
                message = %record.message,
                bytes = outcome.bytes_written,
                rotated = outcome.rotated,
                "Notification logged"
            );
            Ok(Json(Ack::logged()))
        }
        Err(e) => {
            state.counters.record_write_error();
            metrics::record_write_error();
            tracing::error!(request_id = %request_id, error = %e, "Failed to log notification");
            Err(e.into())
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        log_file: state.writer.path().to_path_buf(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.counters.uptime().as_secs(),
    })
}

pub async fn config(State(state): State<AppState>) -> Json<ConfigView> {
    let config = &state.config;
    Json(ConfigView {
        port: config.server.port,
        host: config.server.host.clone(),
        log_file: config.log.file.clone(),
        log_format: config.log.format.as_str(),
        log_rotation: config.log.rotation,
        max_log_size: config.log.max_size.clone(),
        max_log_size_bytes: config.log.max_size_bytes().ok(),
        backup_count: config.log.backup_count,
        log_level: config.observability.log_level.clone(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsSnapshot>, ApiError> {
    let snapshot = StatsSnapshot::collect(&state.writer, &state.counters)?;
    Ok(Json(snapshot))
}

/// True when the request explicitly declares a non-JSON body (e.g. `text/plain`).
fn declares_non_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| !ct.to_ascii_lowercase().contains("json"))
        .unwrap_or(false)
}
