//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGTERM / ctrl-c (signals.rs)
//!     → Shutdown::trigger (shutdown.rs)
//!     → HTTP server drains, cycle ticker exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
