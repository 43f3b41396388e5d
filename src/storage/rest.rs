//! PostgREST-backed record sink.
//!
//! # Responsibilities
//! - Append each cycle's batch to the configured table in one POST
//! - Serve history queries newest-first
//!
//! # Design Decisions
//! - Speaks the PostgREST dialect (`estado=eq.PR`, `order=created_at.desc`)
//!   so a hosted Postgres (Supabase-style) works unmodified

use std::time::Duration;

use crate::config::PersistenceConfig;
use crate::status::{DocumentType, ServiceStatusRecord};
use crate::storage::sink::SinkError;

pub struct RestSink {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestSink {
    pub fn new(config: &PersistenceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.rest_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            table: config.table.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    pub async fn append(&self, records: &[ServiceStatusRecord]) -> Result<(), SinkError> {
        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(records)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SinkError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    pub async fn recent(
        &self,
        state: &str,
        document_type: DocumentType,
        limit: usize,
    ) -> Result<Vec<ServiceStatusRecord>, SinkError> {
        let response = self
            .client
            .get(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[
                ("estado", format!("eq.{}", state)),
                ("modelo", format!("eq.{}", document_type)),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SinkError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}
