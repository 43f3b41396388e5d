//! Critical-endpoint probing subsystem.
//!
//! # Data Flow
//! ```text
//! ProbeConfig
//!     → client.rs (one permissive GET per cycle)
//!     → outcome.rs (ProbeOutcome: HTTP response XOR transport failure)
//!     → classify subsystem
//! ```
//!
//! # Design Decisions
//! - One endpoint, one request, no retries (each cycle is independent)
//! - A failed handshake is signal, not noise: it reaches the classifier
//!   instead of being surfaced as an error

pub mod client;
pub mod outcome;

pub use client::EndpointProbe;
pub use outcome::{ProbeOutcome, TransportError};
