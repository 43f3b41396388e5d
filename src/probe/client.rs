//! Critical-endpoint probe client.
//!
//! # Responsibilities
//! - Issue exactly one GET against the configured endpoint per cycle
//! - Accept every HTTP status as a valid outcome (403 and 500 included)
//! - Capture transport failures as data for the classifier
//!
//! # Design Decisions
//! - Certificate validation and hostname checks are disabled and the TLS
//!   floor is lowered to 1.0: the probed SEFAZ stacks are legacy government
//!   deployments behind WAFs, and a strict client would refuse to even start
//!   the handshake whose rejection is itself the signal we want
//! - Connection pooling is disabled so every probe exercises a fresh socket
//! - No retries: a transient failure is one cycle's verdict, the next cycle
//!   probes again

use std::time::{Duration, Instant};

use reqwest::header::{CONNECTION, CONTENT_TYPE, USER_AGENT};

use crate::config::ProbeConfig;
use crate::probe::outcome::{classify_transport, ProbeOutcome};

/// Probes one authorization endpoint with a deliberately permissive TLS client.
pub struct EndpointProbe {
    client: reqwest::Client,
    url: String,
    user_agent: String,
}

impl EndpointProbe {
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .min_tls_version(reqwest::tls::Version::TLS_1_0)
            .pool_max_idle_per_host(0)
            // Exactly one outbound request per cycle: a 3xx is itself a
            // reached-and-answered outcome, not an invitation to follow.
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Issue one GET and capture whatever happened, HTTP-level or below.
    pub async fn probe(&self) -> ProbeOutcome {
        let start = Instant::now();
        let result = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .header(CONNECTION, "close")
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.to_string());

                match response.bytes().await {
                    Ok(body) => ProbeOutcome::Response {
                        status,
                        content_type,
                        body: body.to_vec(),
                        elapsed_ms: start.elapsed().as_millis() as u64,
                    },
                    // Headers arrived but the body read was cut short. The
                    // connection died under us, so report it as a transport
                    // failure rather than a truncated response.
                    Err(err) => {
                        let (error, detail) = classify_transport(&err);
                        ProbeOutcome::TransportFailure {
                            error,
                            detail,
                            elapsed_ms: start.elapsed().as_millis() as u64,
                        }
                    }
                }
            }
            Err(err) => {
                let (error, detail) = classify_transport(&err);
                tracing::debug!(error = ?error, detail = %detail, "Probe failed below HTTP layer");
                ProbeOutcome::TransportFailure {
                    error,
                    detail,
                    elapsed_ms: start.elapsed().as_millis() as u64,
                }
            }
        }
    }

    pub fn target(&self) -> &str {
        &self.url
    }
}
