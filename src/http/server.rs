//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, cache-busting headers)
//! - Spawn the background cycle ticker
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Every status-bearing response carries no-store headers: staleness is a
//!   first-class failure mode this system exists to detect, so no layer may
//!   cache on our behalf

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::classify::{Classifier, RuleTable};
use crate::config::MonitorConfig;
use crate::http::handlers;
use crate::http::ws;
use crate::matrix::{MatrixSource, PortalSource};
use crate::monitor::Monitor;
use crate::probe::EndpointProbe;
use crate::storage::{MemorySink, RestSink, Sink};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub monitor: Arc<Monitor>,
}

/// HTTP server for the availability monitor.
pub struct HttpServer {
    router: Router,
    config: MonitorConfig,
    monitor: Arc<Monitor>,
}

impl HttpServer {
    /// Build every subsystem from the validated config.
    pub fn new(config: MonitorConfig) -> Result<Self, reqwest::Error> {
        let probe = EndpointProbe::new(&config.probe)?;
        let matrix = MatrixSource::Portal(PortalSource::new(&config.portal)?);
        let classifier = Classifier::new(RuleTable::from_config(&config.probe));

        let sink = if config.persistence.enabled {
            Sink::Rest(RestSink::new(&config.persistence)?)
        } else {
            tracing::info!("Persistence disabled; using in-memory sink");
            Sink::Memory(MemorySink::new())
        };

        let monitor = Arc::new(Monitor::new(&config, probe, matrix, classifier, sink));
        let state = AppState {
            monitor: monitor.clone(),
        };
        let router = Self::build_router(&config, state);

        Ok(Self {
            router,
            config,
            monitor,
        })
    }

    fn build_router(config: &MonitorConfig, state: AppState) -> Router {
        Router::new()
            .route("/status", get(handlers::status))
            .route("/history", get(handlers::history))
            .route("/freshness", get(handlers::freshness))
            .route("/ws", get(ws::upgrade))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store, no-cache, must-revalidate"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::PRAGMA,
                HeaderValue::from_static("no-cache"),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let interval = self.config.service.cycle_interval_secs;
        if interval > 0 {
            let monitor = self.monitor.clone();
            let ticker_shutdown = shutdown.resubscribe();
            tokio::spawn(async move {
                monitor
                    .run(Duration::from_secs(interval), ticker_shutdown)
                    .await;
            });
        } else {
            tracing::info!("Background ticker disabled; cycles run on demand only");
        }

        let mut shutdown = shutdown;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Handle to the monitor, for event subscription.
    pub fn monitor(&self) -> Arc<Monitor> {
        self.monitor.clone()
    }
}
