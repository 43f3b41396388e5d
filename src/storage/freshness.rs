//! Staleness detection for dashboard consumers.
//!
//! # Responsibilities
//! - Cache the newest record per (state, document-type) pair
//! - Answer "is this data stale" from `observed_at` and the freshness window
//!
//! # Design Decisions
//! - An offline record is inherently fresh information: the dashboard should
//!   show the outage, not layer a staleness warning on top of it

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::status::{DocumentType, ServiceStatusRecord};

/// Latest-record cache plus the staleness predicate.
pub struct FreshnessGate {
    latest: DashMap<(String, DocumentType), ServiceStatusRecord>,
    window: Duration,
}

impl FreshnessGate {
    pub fn new(window_secs: u64) -> Self {
        Self {
            latest: DashMap::new(),
            window: Duration::seconds(window_secs as i64),
        }
    }

    /// Record a cycle's batch. Older observations never displace newer ones,
    /// so replayed batches after a partition recovery are harmless.
    pub fn observe(&self, records: &[ServiceStatusRecord]) {
        for record in records {
            self.latest
                .entry(record.key())
                .and_modify(|current| {
                    if record.observed_at >= current.observed_at {
                        *current = record.clone();
                    }
                })
                .or_insert_with(|| record.clone());
        }
    }

    pub fn latest(&self, state: &str, document_type: DocumentType) -> Option<ServiceStatusRecord> {
        self.latest
            .get(&(state.to_string(), document_type))
            .map(|r| r.value().clone())
    }

    /// Stale means: no record, or the newest record is outside the window and
    /// its authorization verdict is not already offline.
    pub fn is_stale(&self, state: &str, document_type: DocumentType, now: DateTime<Utc>) -> bool {
        match self.latest(state, document_type) {
            None => true,
            Some(record) => {
                now.signed_duration_since(record.observed_at) > self.window
                    && !record.authorization.is_offline()
            }
        }
    }
}
