//! Metrics collection and exposition.
//!
//! # Metrics
//! - `loggifly_notifications_received_total` (counter)
//! - `loggifly_notifications_logged_total` (counter): by `format`
//! - `loggifly_rejected_payloads_total` (counter)
//! - `loggifly_write_errors_total` (counter)
//! - `loggifly_bytes_written_total` (counter)
//! - `loggifly_rotations_total` (counter)
//! - `loggifly_append_duration_seconds` (histogram)
//! - `loggifly_log_file_bytes` (gauge): active file size after the last append
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter is opt-in via config

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::writer::{AppendOutcome, LogFormat};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_received() {
    counter!("loggifly_notifications_received_total").increment(1);
}

pub fn record_rejected() {
    counter!("loggifly_rejected_payloads_total").increment(1);
}

pub fn record_logged(format: LogFormat, outcome: &AppendOutcome, start: Instant) {
    counter!("loggifly_notifications_logged_total", "format" => format.as_str()).increment(1);
    counter!("loggifly_bytes_written_total").increment(outcome.bytes_written);
    if outcome.rotated {
        counter!("loggifly_rotations_total").increment(1);
    }
    gauge!("loggifly_log_file_bytes").set(outcome.file_size as f64);
    histogram!("loggifly_append_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_write_error() {
    counter!("loggifly_write_errors_total").increment(1);
}
