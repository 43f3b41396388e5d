//! Classification rule tables.
//!
//! # Responsibilities
//! - Map transport-error categories to verdicts (one table)
//! - Map HTTP status codes to tentative verdicts (a second, independent table)
//! - Detect response bodies that are block/maintenance pages in disguise
//!
//! # Design Decisions
//! - Two decoupled data tables instead of branching control flow, so tuning
//!   the status-code policy never touches the transport policy
//! - The 403 policy is a flag: a WAF 403 proves the front end is alive, but
//!   some operators treat any block as an outage

use crate::classify::verdict::Verdict;
use crate::config::ProbeConfig;
use crate::probe::TransportError;

/// Tunable classification policy, built once from config.
#[derive(Debug, Clone)]
pub struct RuleTable {
    /// `Online` verdicts slower than this are downgraded to `Unstable`.
    pub latency_threshold_ms: u64,
    /// Bodies shorter than this cannot be a genuine service payload.
    pub min_body_bytes: usize,
    /// Whether HTTP 403 counts as proof of life (default) or as an outage.
    pub treat_403_as_online: bool,
}

impl RuleTable {
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            latency_threshold_ms: config.latency_threshold_ms,
            min_body_bytes: config.min_body_bytes,
            treat_403_as_online: config.treat_403_as_online,
        }
    }

    /// Transport-error table. Only the unreached class may produce `Offline`:
    /// a TLS rejection or an active reset means something answered, and a
    /// server that answers is not down.
    pub fn transport_verdict(&self, error: TransportError) -> (Verdict, &'static str) {
        match error {
            TransportError::Timeout => (Verdict::Offline, "timeout: no response within budget"),
            TransportError::DnsFailure => (Verdict::Offline, "DNS resolution failed"),
            TransportError::HostUnreachable => (Verdict::Offline, "host unreachable"),
            TransportError::CertificateRequired => {
                (Verdict::Online, "online (client certificate demanded)")
            }
            TransportError::TlsHandshake => (Verdict::Online, "online (TLS handshake rejected)"),
            // Active resets correlate with load shedding on the SEFAZ
            // middleboxes: alive, but struggling.
            TransportError::ConnectionReset => {
                (Verdict::Unstable, "unstable (connection actively reset)")
            }
            TransportError::Other => (Verdict::Offline, "unrecognized transport failure"),
        }
    }

    /// Status-code table. Every status that reached us is tentatively online;
    /// the single policy exception is 403 under the strict flag.
    pub fn status_verdict(&self, status: u16) -> Verdict {
        match status {
            403 if !self.treat_403_as_online => Verdict::Offline,
            _ => Verdict::Online,
        }
    }

    /// Detect a human-facing error/maintenance page masquerading as a
    /// service response. WAFs love returning HTTP 200 with an HTML block
    /// page, so "we got a response" is not enough.
    pub fn body_mismatch(&self, content_type: Option<&str>, body: &[u8]) -> Option<&'static str> {
        if let Some(ct) = content_type {
            if ct.to_lowercase().contains("text/html") {
                return Some("HTML content type where structured payload expected");
            }
        }
        let text = String::from_utf8_lossy(body);
        let head = text.trim_start_matches('\u{feff}').trim_start().to_lowercase();
        if head.starts_with("<!doctype") || head.starts_with("<html") {
            return Some("markup boilerplate where structured payload expected");
        }
        if body.len() < self.min_body_bytes {
            return Some("implausibly short body for a service payload");
        }
        None
    }
}
