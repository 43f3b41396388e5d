//! Endpoint-reliability classification subsystem.
//!
//! # Data Flow
//! ```text
//! ProbeOutcome
//!     → rules.rs (transport table, status table, body-shape check)
//!     → classifier.rs (precedence: transport → body → status → latency)
//!     → Classification { verdict, diagnostic, latency }
//! ```
//!
//! # Design Decisions
//! - Naive interpretations of network errors are systematically wrong for
//!   legacy government TLS stacks: a handshake rejection proves the server is
//!   up, a timeout proves it is down
//! - Rules are data tables, not control flow, so policy tuning is a one-line
//!   table change

pub mod classifier;
pub mod rules;
pub mod verdict;

pub use classifier::{Classification, Classifier};
pub use rules::RuleTable;
pub use verdict::Verdict;
