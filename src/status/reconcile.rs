//! Reconciliation of the probe verdict into the scraped matrix.
//!
//! # Override rules
//! ```text
//! online   → scraped channels kept as-is (latency attached)
//! unstable → authorization + service-status overwritten
//! offline  → above, plus cascade to authorization-return + protocol-lookup
//! ```
//! Cancellation is never cascaded: voiding is asynchronous and usually keeps
//! working while the authorizer is down.
//!
//! # Design Decisions
//! - Pure function over immutable inputs; the shell's identity fields and
//!   `observed_at` pass through untouched
//! - Idempotent: reconciling twice with the same classification is a no-op

use crate::classify::{Classification, Verdict};
use crate::status::record::ServiceStatusRecord;

/// Merge the probe's classification into a record shell, returning a new
/// record.
pub fn reconcile(shell: &ServiceStatusRecord, probe: &Classification) -> ServiceStatusRecord {
    let mut record = shell.clone();
    record.latency_ms = probe.latency_ms;

    if probe.verdict == Verdict::Online {
        return record;
    }

    record.authorization = probe.verdict;
    record.service_status = probe.verdict;
    record.diagnostic = Some(probe.diagnostic.clone());

    if probe.verdict == Verdict::Offline {
        // The authorizer itself is unreachable; dependent channels cannot be
        // functioning even if the portal still shows stale green.
        record.authorization_return = Verdict::Offline;
        record.protocol_lookup = Verdict::Offline;
    }

    record
}
