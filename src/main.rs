//! SEFAZ availability monitor.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌────────────────────────────────────────────────┐
//!                 │                   MONITOR CYCLE                 │
//!  critical       │  ┌─────────┐    ┌──────────┐                    │
//!  endpoint ──────┼─▶│  probe  │───▶│ classify │──┐                 │
//!                 │  └─────────┘    └──────────┘  │  ┌───────────┐  │
//!                 │                                ├─▶│ reconcile │  │
//!  national       │  ┌─────────┐    ┌──────────┐  │  └─────┬─────┘  │
//!  portal ────────┼─▶│ matrix  │───▶│aggregate │──┘        │        │
//!                 │  └─────────┘    └──────────┘           ▼        │
//!                 │                               ┌──────────────┐  │
//!  dashboard ◀────┼── /status /history /ws ◀──────│ storage +    │  │
//!                 │                               │ freshness    │  │
//!                 │                               └──────────────┘  │
//!                 └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use sefaz_monitor::config::{load_config, MonitorConfig};
use sefaz_monitor::lifecycle::signals::shutdown_signal;
use sefaz_monitor::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "sefaz-monitor")]
#[command(about = "SEFAZ electronic-invoice availability monitor", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    sefaz_monitor::observability::logging::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        probe_url = %config.probe.url,
        critical_state = %config.critical.state,
        cycle_interval_secs = config.service.cycle_interval_secs,
        persistence = config.persistence.enabled,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let serve = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    shutdown_signal().await;
    tracing::info!("Shutdown signal received");
    shutdown.trigger();

    serve.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
