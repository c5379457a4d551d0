//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → environment overrides: PORT, HOST, LOG_FILE, LOG_FORMAT, ... (loader.rs)
//!     → validation.rs (semantic checks)
//!     → HelperConfig (validated, immutable)
//!     → shared via Arc with the request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; `/config` reports exactly what startup saw
//! - All fields have defaults to allow an empty environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod size;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, resolve_config, ConfigError};
pub use schema::{HelperConfig, LogConfig, ObservabilityConfig, ServerConfig};
pub use size::{parse_size, SizeParseError};
pub use validation::{validate_config, ValidationError};
