//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (webhook / health / config / stats)
//!     → response.rs (JSON bodies, error → status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestUuid, X_REQUEST_ID};
pub use response::{Ack, ApiError};
pub use server::{AppState, HttpServer, StartupError};
