//! Matrix-row aggregation into record shells.
//!
//! # Responsibilities
//! - Expand each decoded portal row into two records, one per document model
//! - Collapse `Unknown` cells to online, matching the portal's own rendering
//!
//! # Design Decisions
//! - Every record of a cycle shares one `observed_at` so the batch persists
//!   as a single observation point

use chrono::{DateTime, Utc};

use crate::classify::Verdict;
use crate::matrix::{MatrixRow, PortalStatus};
use crate::status::record::{DocumentType, ServiceStatusRecord};

fn collapse(status: PortalStatus) -> Verdict {
    match status {
        PortalStatus::Online | PortalStatus::Unknown => Verdict::Online,
        PortalStatus::Unstable => Verdict::Unstable,
        PortalStatus::Offline => Verdict::Offline,
    }
}

/// Build the NFe and NFCe record shells for one portal row.
pub fn expand_row(row: &MatrixRow, observed_at: DateTime<Utc>) -> [ServiceStatusRecord; 2] {
    let shell = |document_type| ServiceStatusRecord {
        state: row.state.clone(),
        document_type,
        authorization: collapse(row.channels[0]),
        authorization_return: collapse(row.channels[1]),
        cancellation: collapse(row.channels[2]),
        protocol_lookup: collapse(row.channels[3]),
        service_status: collapse(row.channels[4]),
        diagnostic: None,
        latency_ms: None,
        observed_at,
    };
    [shell(DocumentType::Nfe), shell(DocumentType::Nfce)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_into_both_document_types() {
        let row = MatrixRow {
            state: "MG".into(),
            channels: [
                PortalStatus::Online,
                PortalStatus::Unstable,
                PortalStatus::Offline,
                PortalStatus::Unknown,
                PortalStatus::Online,
            ],
        };
        let now = Utc::now();
        let [nfe, nfce] = expand_row(&row, now);

        assert_eq!(nfe.document_type, DocumentType::Nfe);
        assert_eq!(nfce.document_type, DocumentType::Nfce);
        assert_eq!(nfe.state, "MG");
        assert_eq!(nfe.authorization_return, Verdict::Unstable);
        assert_eq!(nfe.cancellation, Verdict::Offline);
        // Unknown collapses to online, like the portal renders it.
        assert_eq!(nfe.protocol_lookup, Verdict::Online);
        assert_eq!(nfe.observed_at, now);
        assert_eq!(nfe.latency_ms, None);
        assert_eq!(nfe.diagnostic, None);
    }
}
