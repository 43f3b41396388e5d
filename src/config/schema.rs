//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML, and every
//! struct has defaults so a minimal (or empty) config file works.

use serde::{Deserialize, Serialize};

use crate::status::DocumentType;

/// Root configuration for the monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// HTTP listener settings.
    pub listener: ListenerConfig,

    /// Critical-endpoint probe settings.
    pub probe: ProbeConfig,

    /// Which (state, document-type) pair the probe cross-validates.
    pub critical: CriticalEndpointConfig,

    /// National status-portal fetch settings.
    pub portal: PortalConfig,

    /// Persistence backend settings.
    pub persistence: PersistenceConfig,

    /// Cycle cadence, history depth, freshness window.
    pub service: ServiceConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-request handler timeout. Must exceed probe + portal budgets.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Critical-endpoint probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Endpoint probed once per cycle.
    pub url: String,

    /// Timeout budget for the single GET.
    pub timeout_secs: u64,

    /// Online verdicts slower than this downgrade to unstable. Empirical and
    /// operational; useful values observed between 800 and 2000ms.
    pub latency_threshold_ms: u64,

    /// Whether a WAF 403 counts as proof of life (default) or as an outage.
    pub treat_403_as_online: bool,

    /// Bodies shorter than this cannot be a genuine service payload.
    pub min_body_bytes: usize,

    /// Browser-like User-Agent presented to the endpoint.
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: "https://nfce.sefa.pr.gov.br/nfce/NFeAutorizacao4?wsdl".to_string(),
            timeout_secs: 5,
            latency_threshold_ms: 1500,
            treat_403_as_online: true,
            min_body_bytes: 64,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Which matrix cell the probe verdict overrides.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CriticalEndpointConfig {
    /// Two-letter jurisdiction code.
    pub state: String,

    pub document_type: DocumentType,
}

impl Default for CriticalEndpointConfig {
    fn default() -> Self {
        Self {
            state: "PR".to_string(),
            document_type: DocumentType::Nfce,
        }
    }
}

/// National status-portal configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PortalConfig {
    pub url: String,

    /// Independent timeout budget for the portal fetch.
    pub timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            url: "https://www.nfe.fazenda.gov.br/portal/disponibilidade.aspx".to_string(),
            timeout_secs: 8,
        }
    }
}

/// Persistence backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// When false, records go to the in-memory sink.
    pub enabled: bool,

    /// PostgREST-style base URL (a Supabase project URL works as-is).
    pub rest_url: String,

    pub api_key: String,

    pub table: String,

    pub timeout_secs: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rest_url: String::new(),
            api_key: String::new(),
            table: "sefaz_logs".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Cycle cadence and dashboard-facing knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Background cycle cadence. Zero disables the ticker (cycles then run
    /// only on demand via GET /status).
    pub cycle_interval_secs: u64,

    /// Records returned by GET /history.
    pub history_limit: usize,

    /// Data older than this without an offline verdict is stale.
    pub freshness_window_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cycle_interval_secs: 15,
            history_limit: 30,
            freshness_window_secs: 300,
        }
    }
}
