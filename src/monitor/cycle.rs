//! Cycle orchestration.
//!
//! # Data Flow
//! ```text
//! probe ──┐ (two independent outbound tasks, joined)
//!         ├─▶ classify ─▶ aggregate ─▶ reconcile ─▶ persist ─▶ fan-out
//! portal ─┘
//! ```
//!
//! # Design Decisions
//! - A cycle mutex guarantees no cycle starts before the previous one's
//!   persistence step completes (keeps `observed_at` ordering sane)
//! - Persistence failures are logged and swallowed; the batch is still
//!   returned, cached for freshness, and broadcast
//! - Zero portal rows is a crawler failure, surfaced as a distinct error so
//!   the dashboard never shows "our scraper broke" as a service outage

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, Mutex};

use crate::classify::Classifier;
use crate::config::MonitorConfig;
use crate::matrix::MatrixSource;
use crate::probe::EndpointProbe;
use crate::status::aggregate::expand_row;
use crate::status::reconcile::reconcile;
use crate::status::{DocumentType, ServiceStatusRecord};
use crate::storage::{FreshnessGate, Sink, SinkError};

/// Why a cycle produced no records.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    /// The portal answered but no rows could be decoded.
    #[error("status portal returned no parseable rows")]
    LayoutChanged,
    /// The portal fetch itself failed.
    #[error("status portal unreachable: {0}")]
    PortalUnreachable(String),
}

/// Owns one probe target, the matrix source, and the record pipeline.
pub struct Monitor {
    probe: EndpointProbe,
    matrix: MatrixSource,
    classifier: Classifier,
    critical_state: String,
    critical_document: DocumentType,
    sink: Sink,
    freshness: FreshnessGate,
    history_limit: usize,
    events: broadcast::Sender<ServiceStatusRecord>,
    cycle_lock: Mutex<()>,
}

impl Monitor {
    pub fn new(
        config: &MonitorConfig,
        probe: EndpointProbe,
        matrix: MatrixSource,
        classifier: Classifier,
        sink: Sink,
    ) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            probe,
            matrix,
            classifier,
            critical_state: config.critical.state.clone(),
            critical_document: config.critical.document_type,
            sink,
            freshness: FreshnessGate::new(config.service.freshness_window_secs),
            history_limit: config.service.history_limit,
            events,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Run one full cycle: probe ∥ portal fetch, classify, aggregate,
    /// reconcile, persist, fan out. Returns the reconciled batch.
    pub async fn run_cycle(&self) -> Result<Vec<ServiceStatusRecord>, CycleError> {
        let _guard = self.cycle_lock.lock().await;

        let (outcome, portal_result) = tokio::join!(self.probe.probe(), self.matrix.fetch());

        let classification = self.classifier.classify(&outcome);
        tracing::info!(
            target_url = %self.probe.target(),
            verdict = %classification.verdict,
            diagnostic = %classification.diagnostic,
            elapsed_ms = outcome.elapsed_ms(),
            "Probe classified"
        );

        let rows = portal_result.map_err(|e| CycleError::PortalUnreachable(e.to_string()))?;
        if rows.is_empty() {
            tracing::warn!("Portal yielded zero rows; layout may have changed");
            return Err(CycleError::LayoutChanged);
        }

        let observed_at = Utc::now();
        let mut records = Vec::with_capacity(rows.len() * 2);
        for row in &rows {
            for shell in expand_row(row, observed_at) {
                let record = if shell.state == self.critical_state
                    && shell.document_type == self.critical_document
                {
                    reconcile(&shell, &classification)
                } else {
                    shell
                };
                records.push(record);
            }
        }

        if let Err(error) = self.sink.append(&records).await {
            // Non-fatal: serving fresh status outranks the write.
            tracing::warn!(error = %error, batch = records.len(), "Failed to persist cycle batch");
        }

        self.freshness.observe(&records);
        for record in &records {
            let _ = self.events.send(record.clone());
        }

        tracing::debug!(records = records.len(), states = rows.len(), "Cycle complete");
        Ok(records)
    }

    /// Periodic cycle driver; exits on shutdown signal.
    pub async fn run(
        self: Arc<Self>,
        interval: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        tracing::info!(interval_secs = interval.as_secs(), "Cycle ticker starting");
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(error) = self.run_cycle().await {
                        tracing::warn!(error = %error, "Scheduled cycle failed");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Cycle ticker received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    pub async fn history(
        &self,
        state: &str,
        document_type: DocumentType,
    ) -> Result<Vec<ServiceStatusRecord>, SinkError> {
        self.sink.recent(state, document_type, self.history_limit).await
    }

    pub fn is_stale(&self, state: &str, document_type: DocumentType) -> bool {
        self.freshness.is_stale(state, document_type, Utc::now())
    }

    pub fn latest(&self, state: &str, document_type: DocumentType) -> Option<ServiceStatusRecord> {
        self.freshness.latest(state, document_type)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServiceStatusRecord> {
        self.events.subscribe()
    }
}
