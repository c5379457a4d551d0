//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the log writer produce:
//!     → logging.rs (structured console events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Container stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
