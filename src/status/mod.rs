//! Per-state availability records.
//!
//! # Data Flow
//! ```text
//! MatrixRow ──aggregate.rs──▶ two record shells (NFe, NFCe)
//! Classification ──reconcile.rs──▶ override + cascade on the critical pair
//!     → immutable ServiceStatusRecord batch
//! ```

pub mod aggregate;
pub mod record;
pub mod reconcile;

pub use record::{DocumentType, ServiceStatusRecord};
