//! Structured logging initialization.
//!
//! # Design Decisions
//! - `tracing` with env-filter: `RUST_LOG` wins, with a sane default filter
//! - Structured fields over string interpolation throughout the codebase

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. Call once at startup.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sefaz_monitor=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
