//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! reconciled batch
//!     → sink.rs (Rest or Memory backend, append-only)
//!     → freshness.rs (latest-record cache, staleness predicate)
//!     → /history and /freshness consumers
//! ```
//!
//! # Design Decisions
//! - Append failures are logged and swallowed: a missed write must never
//!   prevent fresh status from reaching the dashboard

pub mod freshness;
pub mod memory;
pub mod rest;
pub mod sink;

pub use freshness::FreshnessGate;
pub use memory::MemorySink;
pub use rest::RestSink;
pub use sink::{Sink, SinkError};
