//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::HelperConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { name: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { name, value } => {
                write!(f, "Invalid value for environment variable {}: '{}'", name, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<HelperConfig, ConfigError> {
    let config = read_config_file(path)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective configuration: defaults, then the optional file,
/// then process environment overrides, then validation.
pub fn resolve_config(path: Option<&Path>) -> Result<HelperConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => HelperConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<HelperConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply the container-style environment variables on top of `config`.
///
/// `lookup` abstracts the environment so tests need not mutate process state.
pub fn apply_env_overrides<F>(config: &mut HelperConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = parse_env("PORT", port)?;
    }
    if let Some(file) = lookup("LOG_FILE") {
        config.log.file = PathBuf::from(file);
    }
    if let Some(format) = lookup("LOG_FORMAT") {
        config.log.format = format.into();
    }
    if let Some(rotation) = lookup("LOG_ROTATION") {
        config.log.rotation = is_true(&rotation);
    }
    if let Some(max_size) = lookup("MAX_LOG_SIZE") {
        config.log.max_size = max_size;
    }
    if let Some(count) = lookup("BACKUP_COUNT") {
        config.log.backup_count = parse_env("BACKUP_COUNT", count)?;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level.to_ascii_lowercase();
    }
    if let Some(json) = lookup("LOG_JSON") {
        config.observability.json_logs = is_true(&json);
    }
    if let Some(enabled) = lookup("METRICS_ENABLED") {
        config.observability.metrics_enabled = is_true(&enabled);
    }
    if let Some(address) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_address = address;
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { name, value })
}

fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
