//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, timeout, request ID)
//! - Build the shared state injected into handlers
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{HelperConfig, SizeParseError};
use crate::http::handlers;
use crate::http::request::RequestUuid;
use crate::lifecycle::ShutdownSignal;
use crate::stats::ProcessCounters;
use crate::writer::{LogWriter, WriteError};

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid rotation size: {0}")]
    Size(#[from] SizeParseError),

    #[error(transparent)]
    Writer(#[from] WriteError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HelperConfig>,
    pub writer: Arc<LogWriter>,
    pub counters: Arc<ProcessCounters>,
}

impl AppState {
    /// Open the log writer described by `config` and start fresh counters.
    pub fn from_config(config: HelperConfig) -> Result<Self, StartupError> {
        let policy = config.rotation_policy()?;
        let writer = LogWriter::open(config.log.file.clone(), policy)?;
        Ok(Self {
            config: Arc::new(config),
            writer: Arc::new(writer),
            counters: Arc::new(ProcessCounters::new()),
        })
    }
}

/// HTTP server for the helper.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: HelperConfig) -> Result<Self, StartupError> {
        Ok(Self::with_state(AppState::from_config(config)?))
    }

    /// Create a server around existing state.
    pub fn with_state(state: AppState) -> Self {
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let server = &state.config.server;
        let timeout = Duration::from_secs(server.request_timeout_secs);
        let max_body = server.max_body_bytes;

        Router::new()
            .route("/webhook", post(handlers::webhook))
            .route("/health", get(handlers::health))
            .route("/config", get(handlers::config))
            .route("/stats", get(handlers::stats))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(max_body))
            .layer(TimeoutLayer::new(timeout))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
    }

    /// The configured router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
