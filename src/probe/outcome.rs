//! Raw probe outcome types.
//!
//! # Design Decisions
//! - A probe either reaches the HTTP layer or fails below it; the enum makes
//!   the two cases mutually exclusive by construction
//! - Transport failures are data, not errors: they flow into the classifier
//!   with a fixed vocabulary instead of bubbling up as `Err`
//! - The raw error chain text is preserved as `detail` for diagnostics

use std::error::Error as StdError;

/// Low-level failure category for probes that never produced an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// No byte of response arrived within the timeout budget.
    Timeout,
    /// Name resolution failed.
    DnsFailure,
    /// No route to the host.
    HostUnreachable,
    /// The peer (or a middlebox) actively tore the connection down.
    ConnectionReset,
    /// The server demanded a client certificate the prober does not present.
    CertificateRequired,
    /// TLS negotiation was rejected below the HTTP layer.
    TlsHandshake,
    /// Anything else (connection refused, malformed response, ...).
    Other,
}

/// Result of one probe attempt against the critical endpoint.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    /// An HTTP response was received. Any status code counts, including 403/500.
    Response {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
        elapsed_ms: u64,
    },
    /// The request failed below the HTTP layer.
    TransportFailure {
        error: TransportError,
        detail: String,
        elapsed_ms: u64,
    },
}

impl ProbeOutcome {
    /// Wall-clock duration of the attempt.
    pub fn elapsed_ms(&self) -> u64 {
        match self {
            ProbeOutcome::Response { elapsed_ms, .. } => *elapsed_ms,
            ProbeOutcome::TransportFailure { elapsed_ms, .. } => *elapsed_ms,
        }
    }
}

/// Map a reqwest error onto the transport vocabulary.
///
/// reqwest does not expose structured error kinds below "connect"/"timeout",
/// so the source chain text is matched the same way the legacy monitor matched
/// Node error codes (EPROTO, ECONNRESET, ETIMEDOUT, ...).
pub fn classify_transport(err: &reqwest::Error) -> (TransportError, String) {
    let detail = error_chain_text(err);
    if err.is_timeout() {
        return (TransportError::Timeout, detail);
    }
    let lower = detail.to_lowercase();
    let error = if lower.contains("dns") || lower.contains("failed to lookup") {
        TransportError::DnsFailure
    } else if lower.contains("unreachable") || lower.contains("no route to host") {
        TransportError::HostUnreachable
    } else if lower.contains("certificate required") || lower.contains("certificate") {
        TransportError::CertificateRequired
    } else if lower.contains("handshake")
        || lower.contains("ssl")
        || lower.contains("tls")
        || lower.contains("wrong version number")
    {
        TransportError::TlsHandshake
    } else if lower.contains("connection reset")
        || lower.contains("reset by peer")
        || lower.contains("broken pipe")
    {
        TransportError::ConnectionReset
    } else {
        TransportError::Other
    };
    (error, detail)
}

/// Flatten an error chain into one line: "outer: cause: root".
fn error_chain_text(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
