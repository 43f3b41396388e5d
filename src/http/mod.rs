//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! GET /status     → one full cycle → reconciled batch as JSON
//! GET /history    → persisted records, newest first
//! GET /freshness  → staleness predicate
//! GET /ws         → insert-event stream filtered by state
//! ```

pub mod handlers;
pub mod server;
pub mod ws;

pub use server::{AppState, HttpServer};
