//! Record sink dispatch.
//!
//! # Design Decisions
//! - Enum dispatch over the two backends keeps handlers free of generics and
//!   avoids boxing async trait objects
//! - Append failures never fail a cycle: serving fresh status outranks
//!   guaranteeing the write

use crate::status::{DocumentType, ServiceStatusRecord};
use crate::storage::memory::MemorySink;
use crate::storage::rest::RestSink;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage rejected request with HTTP {0}")]
    Status(u16),
}

/// Append-only record storage.
pub enum Sink {
    Rest(RestSink),
    Memory(MemorySink),
}

impl Sink {
    /// Append one cycle's batch. Errors are returned for logging but callers
    /// treat them as non-fatal.
    pub async fn append(&self, records: &[ServiceStatusRecord]) -> Result<(), SinkError> {
        match self {
            Sink::Rest(sink) => sink.append(records).await,
            Sink::Memory(sink) => {
                sink.append(records);
                Ok(())
            }
        }
    }

    /// Most recent records for one (state, document-type) pair, newest first.
    pub async fn recent(
        &self,
        state: &str,
        document_type: DocumentType,
        limit: usize,
    ) -> Result<Vec<ServiceStatusRecord>, SinkError> {
        match self {
            Sink::Rest(sink) => sink.recent(state, document_type, limit).await,
            Sink::Memory(sink) => Ok(sink.recent(state, document_type, limit)),
        }
    }
}
