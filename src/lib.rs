//! LoggiFly Helper Library
//!
//! Receives LoggiFly webhook notifications and appends every one of them to a
//! size-rotated log file.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notification;
pub mod observability;
pub mod stats;
pub mod writer;

pub use config::schema::HelperConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use notification::{normalize, NotificationRecord};
pub use writer::{LogFormat, LogWriter};
