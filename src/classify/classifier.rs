//! Outcome classifier: raw probe outcome → availability verdict.
//!
//! # Rule precedence
//! ```text
//! 1. transport table   (unreached ⇒ offline; TLS rejection ⇒ online; reset ⇒ unstable)
//! 2. body-shape check  (block page in disguise ⇒ offline)
//! 3. status-code table (tentative verdict, 403 policy)
//! 4. latency check     (online ⇒ unstable past the threshold)
//! ```
//! Each rule is final once it fires; a later, weaker rule never upgrades a
//! verdict an earlier rule already settled.

use crate::classify::rules::RuleTable;
use crate::classify::verdict::Verdict;
use crate::probe::ProbeOutcome;

/// Classifier output for one probe cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub verdict: Verdict,
    /// Human-readable reason for the verdict.
    pub diagnostic: String,
    /// Measured latency; absent when the endpoint never answered.
    pub latency_ms: Option<u64>,
}

/// Turns noisy network outcomes into semantic availability.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleTable,
}

impl Classifier {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn classify(&self, outcome: &ProbeOutcome) -> Classification {
        match outcome {
            ProbeOutcome::TransportFailure {
                error,
                detail,
                elapsed_ms,
            } => {
                let (verdict, label) = self.rules.transport_verdict(*error);
                Classification {
                    verdict,
                    diagnostic: format!("{} [{}]", label, detail),
                    latency_ms: if verdict.is_offline() {
                        None
                    } else {
                        Some(*elapsed_ms)
                    },
                }
            }
            ProbeOutcome::Response {
                status,
                content_type,
                body,
                elapsed_ms,
            } => {
                if let Some(reason) = self.rules.body_mismatch(content_type.as_deref(), body) {
                    return Classification {
                        verdict: Verdict::Offline,
                        diagnostic: format!("{} (HTTP {})", reason, status),
                        latency_ms: None,
                    };
                }

                let tentative = self.rules.status_verdict(*status);
                if tentative.is_offline() {
                    return Classification {
                        verdict: Verdict::Offline,
                        diagnostic: format!("HTTP {} treated as block", status),
                        latency_ms: None,
                    };
                }

                if *elapsed_ms > self.rules.latency_threshold_ms {
                    return Classification {
                        verdict: Verdict::Unstable,
                        diagnostic: format!("slow response (HTTP {}, {}ms)", status, elapsed_ms),
                        latency_ms: Some(*elapsed_ms),
                    };
                }

                Classification {
                    verdict: Verdict::Online,
                    diagnostic: format!("OK (HTTP {})", status),
                    latency_ms: Some(*elapsed_ms),
                }
            }
        }
    }
}
