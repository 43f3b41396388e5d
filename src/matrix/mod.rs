//! National status-matrix boundary.
//!
//! # Data Flow
//! ```text
//! national portal HTML
//!     → portal.rs (fetch + color decode)
//!     → MatrixRow { state, 5 channel columns }
//!     → status::aggregate
//! ```
//!
//! # Design Decisions
//! - The core only depends on the decoded row shape; the portal adapter is a
//!   deliberately thin, replaceable boundary
//! - Rows that fail to parse are dropped, never reported as outages: a layout
//!   change is a crawler problem, not a service problem

pub mod portal;

pub use portal::{PortalError, PortalSource};

/// Where matrix rows come from.
///
/// Enum dispatch, like `storage::Sink`: the live portal adapter in
/// production, fixed rows for tests and offline development.
pub enum MatrixSource {
    Portal(PortalSource),
    Fixed(Vec<MatrixRow>),
}

impl MatrixSource {
    pub async fn fetch(&self) -> Result<Vec<MatrixRow>, PortalError> {
        match self {
            MatrixSource::Portal(portal) => portal.fetch().await,
            MatrixSource::Fixed(rows) => Ok(rows.clone()),
        }
    }
}

/// Status color decoded from one portal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalStatus {
    Online,
    Unstable,
    Offline,
    /// No status image in the cell. The portal renders these as available.
    Unknown,
}

/// Number of service channels the portal reports per state.
pub const CHANNEL_COLUMNS: usize = 5;

/// One decoded row of the national availability table.
///
/// Columns, in portal order: authorization, authorization-return,
/// cancellation, protocol-lookup, service-status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    /// Two-letter jurisdiction code.
    pub state: String,
    pub channels: [PortalStatus; CHANNEL_COLUMNS],
}
