//! Analyzer service entry point.
//!
//! The analyzer ingests per-timestep telemetry that a traffic simulation
//! publishes on NATS, keeps it in memory as time series, and serves it
//! over an HTTP query API.
//!
//! # Architecture
//!
//! ```text
//! NATS (one task per subscription) --> Dispatcher --> SimulationRegistry
//!                                                          ^
//!                                HTTP API --> QueryFacade -+
//! ```
//!
//! Ctrl-C stops the consumers and the HTTP server, then the process exits.

mod config;
mod error;
mod nats;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use transflow_api::{AppState, spawn_api};
use transflow_store::{Dispatcher, SimulationRegistry};

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::nats::{BusClient, consume};

/// Application entry point.
///
/// Initializes logging, loads configuration, connects to NATS, starts one
/// consumer per subscription plus the API server, and runs until Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the bus is unreachable,
/// a subscription fails, or the API address is unusable.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("transflow-analyzer starting");
    run().await?;
    Ok(())
}

/// Run the service until Ctrl-C.
async fn run() -> Result<(), AnalyzerError> {
    let config = AnalyzerConfig::load()?;
    let layout = config.topics.layout();
    info!(
        nats_url = config.bus.url,
        client_id = config.bus.client_id,
        subscriptions = ?config.bus.subscriptions,
        topic_root = layout.root(),
        topic_metrics = layout.metrics(),
        api_host = config.api.host,
        api_port = config.api.port,
        "configuration loaded"
    );

    let registry = Arc::new(SimulationRegistry::new());
    let dispatcher = Dispatcher::with_layout(registry, layout);

    // Any failure from here to the first received message is fatal.
    let bus = BusClient::connect(&config.bus.url, &config.bus.client_id).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut consumers = Vec::with_capacity(config.bus.subscriptions.len());
    for pattern in &config.bus.subscriptions {
        let subscriber = bus.subscribe(pattern).await?;
        consumers.push(tokio::spawn(consume(
            subscriber,
            pattern.clone(),
            dispatcher.clone(),
            shutdown_rx.clone(),
        )));
    }

    let state = Arc::new(AppState::new(&dispatcher));
    let mut api_shutdown = shutdown_rx;
    let api = spawn_api(config.api.clone(), state, async move {
        // Either a send or a dropped sender means stop.
        let _ = api_shutdown.changed().await;
    })?;

    info!(consumers = consumers.len(), "analyzer running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    info!("shutdown requested");
    shutdown_tx.send_replace(true);

    for consumer in consumers {
        if let Err(e) = consumer.await {
            warn!(error = %e, "consumer task failed");
        }
    }
    if let Err(e) = api.await {
        warn!(error = %e, "API server task failed");
    }

    let counts = dispatcher.stats().counts();
    info!(
        simulations = dispatcher.registry().len(),
        stored = counts.stored,
        topic_rejected = counts.topic_rejected,
        decode_rejected = counts.decode_rejected,
        "transflow-analyzer shutdown complete"
    );
    Ok(())
}
