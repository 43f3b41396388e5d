//! Monitoring cycle subsystem.

pub mod cycle;

pub use cycle::{CycleError, Monitor};
