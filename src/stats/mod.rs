//! Read-only introspection state.
//!
//! # Responsibilities
//! - Count received, logged and failed notifications since process start
//! - Assemble the `/stats` view from counters plus live filesystem metadata
//!
//! # Design Decisions
//! - Counters are plain atomics; they never touch the write path's lock
//! - Nothing here is persisted, a restart resets the counters

pub mod counters;
pub mod snapshot;

pub use counters::{CounterValues, ProcessCounters};
pub use snapshot::StatsSnapshot;
