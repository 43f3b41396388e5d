//! In-memory record sink.
//!
//! Used when no persistence backend is configured, and by tests. Keeps a
//! bounded log so a long-running sink-less deployment does not grow without
//! limit.

use std::collections::VecDeque;
use std::sync::RwLock;

use crate::status::{DocumentType, ServiceStatusRecord};

const MAX_RECORDS: usize = 10_000;

#[derive(Default)]
pub struct MemorySink {
    records: RwLock<VecDeque<ServiceStatusRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, records: &[ServiceStatusRecord]) {
        let mut log = self.records.write().unwrap_or_else(|e| e.into_inner());
        for record in records {
            log.push_back(record.clone());
        }
        while log.len() > MAX_RECORDS {
            log.pop_front();
        }
    }

    pub fn recent(
        &self,
        state: &str,
        document_type: DocumentType,
        limit: usize,
    ) -> Vec<ServiceStatusRecord> {
        let log = self.records.read().unwrap_or_else(|e| e.into_inner());
        log.iter()
            .rev()
            .filter(|r| r.state == state && r.document_type == document_type)
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Verdict;
    use chrono::Utc;

    fn record(state: &str, latency: u64) -> ServiceStatusRecord {
        ServiceStatusRecord {
            state: state.into(),
            document_type: DocumentType::Nfce,
            authorization: Verdict::Online,
            authorization_return: Verdict::Online,
            cancellation: Verdict::Online,
            protocol_lookup: Verdict::Online,
            service_status: Verdict::Online,
            diagnostic: None,
            latency_ms: Some(latency),
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn recent_is_newest_first_and_filtered() {
        let sink = MemorySink::new();
        sink.append(&[record("PR", 1), record("SP", 2)]);
        sink.append(&[record("PR", 3)]);

        let recent = sink.recent("PR", DocumentType::Nfce, 10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].latency_ms, Some(3));
        assert_eq!(recent[1].latency_ms, Some(1));

        assert!(sink.recent("PR", DocumentType::Nfe, 10).is_empty());
        assert_eq!(sink.recent("PR", DocumentType::Nfce, 1).len(), 1);
    }
}
