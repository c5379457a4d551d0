//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the helper.
//! All types derive Serde traits for deserialization from config files.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::size::{parse_size, SizeParseError};
use crate::writer::{LogFormat, RotationPolicy};

/// Root configuration for the LoggiFly helper.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct HelperConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Notification log file settings.
    pub log: LogConfig,

    /// Console logging and metrics.
    pub observability: ObservabilityConfig,
}

impl HelperConfig {
    /// Address string for the listener (e.g., "0.0.0.0:5353").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Rotation thresholds derived from the log section.
    pub fn rotation_policy(&self) -> Result<RotationPolicy, SizeParseError> {
        if !self.log.rotation {
            return Ok(RotationPolicy::disabled());
        }
        Ok(RotationPolicy {
            enabled: true,
            max_bytes: self.log.max_size_bytes()?,
            backup_count: self.log.backup_count,
        })
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,

    /// TCP port to bind.
    pub port: u16,

    /// Total time allowed per request, in seconds.
    pub request_timeout_secs: u64,

    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5353,
            request_timeout_secs: 30,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Notification log configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Active log file; backups live next to it as `file.1 .. file.N`.
    pub file: PathBuf,

    /// Line format (detailed, simple, json).
    pub format: LogFormat,

    /// Enable size-based rotation.
    pub rotation: bool,

    /// Rotation threshold as a size string ("10MB", "512KB", "4096").
    pub max_size: String,

    /// Number of rotated backups to keep.
    pub backup_count: u32,
}

impl LogConfig {
    /// Rotation threshold in bytes.
    pub fn max_size_bytes(&self) -> Result<u64, SizeParseError> {
        parse_size(&self.max_size)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("/logs/loggifly-notifications.log"),
            format: LogFormat::Detailed,
            rotation: true,
            max_size: "10MB".to_string(),
            backup_count: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit console logs as JSON.
    pub json_logs: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl ObservabilityConfig {
    pub fn metrics_socket_addr(&self) -> Option<SocketAddr> {
        self.metrics_address.parse().ok()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HelperConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:5353");
        assert_eq!(config.log.file, PathBuf::from("/logs/loggifly-notifications.log"));
        assert_eq!(config.log.format, LogFormat::Detailed);
        assert_eq!(config.log.max_size_bytes().unwrap(), 10 * 1024 * 1024);
        assert_eq!(config.log.backup_count, 5);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: HelperConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [log]
            format = "json"
            max_size = "1KB"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.log.format, LogFormat::Json);
        assert!(config.log.rotation);
        assert_eq!(
            config.rotation_policy().unwrap(),
            RotationPolicy {
                enabled: true,
                max_bytes: 1024,
                backup_count: 5
            }
        );
    }

    #[test]
    fn test_rotation_disabled_policy() {
        let mut config = HelperConfig::default();
        config.log.rotation = false;
        config.log.max_size = "garbage".to_string();
        assert_eq!(config.rotation_policy().unwrap(), RotationPolicy::disabled());
    }
}
