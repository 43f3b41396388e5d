//! Reconciled availability records.
//!
//! # Design Decisions
//! - Records are immutable once built; corrections are new records
//! - Wire field names keep the original dashboard/storage contract
//!   (Portuguese column names in the `sefaz_logs` table)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::Verdict;

/// Electronic-invoice document model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "NFe")]
    Nfe,
    #[serde(rename = "NFCe")]
    Nfce,
}

impl std::str::FromStr for DocumentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nfe" => Ok(DocumentType::Nfe),
            "nfce" => Ok(DocumentType::Nfce),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Nfe => write!(f, "NFe"),
            DocumentType::Nfce => write!(f, "NFCe"),
        }
    }
}

/// One observation of a (state, document-type) pair's five service channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatusRecord {
    /// Two-letter jurisdiction code.
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "modelo")]
    pub document_type: DocumentType,
    #[serde(rename = "autorizacao")]
    pub authorization: Verdict,
    #[serde(rename = "retorno_autorizacao")]
    pub authorization_return: Verdict,
    #[serde(rename = "inutilizacao")]
    pub cancellation: Verdict,
    #[serde(rename = "consulta")]
    pub protocol_lookup: Verdict,
    #[serde(rename = "status_servico")]
    pub service_status: Verdict,
    /// Explains the worst channel's verdict after an override.
    #[serde(rename = "details")]
    pub diagnostic: Option<String>,
    /// Only populated for the actively-probed endpoint.
    #[serde(rename = "latency")]
    pub latency_ms: Option<u64>,
    /// Set at creation, never touched afterwards.
    #[serde(rename = "created_at")]
    pub observed_at: DateTime<Utc>,
}

impl ServiceStatusRecord {
    /// Identity key for freshness tracking and history queries.
    pub fn key(&self) -> (String, DocumentType) {
        (self.state.clone(), self.document_type)
    }
}
