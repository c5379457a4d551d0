//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, sizes parseable)
//! - Check addresses and log levels before anything binds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HelperConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::HelperConfig;
use crate::config::size::SizeParseError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.host must not be empty")]
    EmptyHost,

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("server.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("log.file must not be empty")]
    EmptyLogFile,

    #[error("log.max_size: {0}")]
    InvalidMaxSize(#[from] SizeParseError),

    #[error("log.max_size must be greater than zero when rotation is enabled")]
    ZeroMaxSize,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &HelperConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.server.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.log.file.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyLogFile);
    }
    if config.log.rotation {
        match config.log.max_size_bytes() {
            Ok(0) => errors.push(ValidationError::ZeroMaxSize),
            Ok(_) => {}
            Err(e) => errors.push(e.into()),
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.metrics_enabled && config.observability.metrics_socket_addr().is_none() {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
