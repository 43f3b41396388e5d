//! SEFAZ availability monitor library.
//!
//! Probes one critical invoice-authorization endpoint, cross-validates the
//! national status portal's matrix against it, and serves the reconciled
//! per-state availability records over HTTP.

pub mod classify;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod matrix;
pub mod monitor;
pub mod observability;
pub mod probe;
pub mod status;
pub mod storage;

pub use config::MonitorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
