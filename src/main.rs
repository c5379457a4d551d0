//! LoggiFly Helper
//!
//! Webhook receiver that writes every LoggiFly notification to a rotating log file.
//!
//! # Architecture Overview
//!
//! ```text
//!     LoggiFly                 ┌──────────────────────────────────────────────────┐
//!     POST /webhook            │                  LOGGIFLY HELPER                  │
//!     ─────────────────────────┼─▶ http ──▶ notification ──▶ writer ──▶ log file   │
//!                              │   server    normalizer     format     log.1..N    │
//!                              │     │                      rotation                │
//!     GET /health /config      │     │                                              │
//!         /stats               │     └──▶ stats (counters + fs metadata)            │
//!     ◀────────────────────────┼─────────                                           │
//!                              │  config · observability · lifecycle               │
//!                              └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use loggifly_helper::config::resolve_config;
use loggifly_helper::http::HttpServer;
use loggifly_helper::lifecycle::{signals, Shutdown};
use loggifly_helper::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "loggifly-helper")]
#[command(about = "Log every LoggiFly webhook notification to a rotating file", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;

    logging::init(&config.observability)?;

    tracing::info!("loggifly-helper v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.bind_address(),
        log_file = %config.log.file.display(),
        log_format = %config.log.format,
        log_level = %config.observability.log_level,
        "Configuration loaded"
    );
    tracing::info!(
        enabled = config.log.rotation,
        max_size = %config.log.max_size,
        backups = config.log.backup_count,
        "Log rotation"
    );

    if config.observability.metrics_enabled {
        if let Some(addr) = config.observability.metrics_socket_addr() {
            metrics::init_metrics(addr);
        }
    }

    let bind_address = config.bind_address();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Ready to log all notifications");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    signals::spawn_signal_listener(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
