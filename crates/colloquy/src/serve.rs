// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `colloquy serve` command implementation.
//!
//! Starts the full service: WAL-mode SQLite storage, the usage ledger and
//! its background recorder, the Anthropic client, the context assembler,
//! the reply engine, and the REST gateway. Supports graceful shutdown via
//! SIGINT/SIGTERM.

use colloquy_agent::ReplyEngine;
use colloquy_anthropic::AnthropicClient;
use colloquy_config::ColloquyConfig;
use colloquy_context::ContextAssembler;
use colloquy_core::ColloquyError;
use colloquy_cost::{UsageLedger, UsageRecorder};
use colloquy_gateway::AppState;
use colloquy_storage::Database;
use tracing::{error, info};

/// Runs the `colloquy serve` command.
///
/// Wires every component onto one shared database handle, serves the REST
/// API until a shutdown signal arrives, then drains the usage recorder and
/// checkpoints the database.
pub async fn run_serve(config: ColloquyConfig) -> Result<(), ColloquyError> {
    init_tracing(&config.service.log_level);

    info!("starting colloquy serve");

    let db = Database::open_with_wal(&config.storage.database_path, config.storage.wal_mode)
        .await?;
    info!(
        path = config.storage.database_path.as_str(),
        wal = config.storage.wal_mode,
        "storage ready"
    );

    let ledger = UsageLedger::new(db.clone());
    let (recorder, recorder_task) = UsageRecorder::spawn(ledger.clone());

    let client = AnthropicClient::from_config(&config.anthropic).map_err(|e| {
        error!(error = %e, "failed to initialize Anthropic client");
        eprintln!(
            "error: Anthropic API key required. Set anthropic.api_key in colloquy.toml \
             or the COLLOQUY_ANTHROPIC_API_KEY environment variable."
        );
        e
    })?;
    info!(model = client.default_model(), "anthropic client ready");

    let assembler = ContextAssembler::new(db.clone(), &config.context);
    let engine = ReplyEngine::new(db.clone(), assembler, client, recorder.clone());
    let state = AppState::new(db.clone(), ledger, engine);

    colloquy_gateway::serve(
        &config.server.host,
        config.server.port,
        state,
        shutdown_signal(),
    )
    .await?;

    // The gateway dropped its state on shutdown; dropping the last recorder
    // handle closes the channel so the worker drains and exits.
    drop(recorder);
    if recorder_task.await.is_err() {
        error!("usage recorder task panicked");
    }

    db.close().await?;

    info!("colloquy serve shutdown complete");
    Ok(())
}

/// Resolves when SIGINT (Ctrl+C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

        tokio::select! {
            _ = ctrl_c => {
                info!("received SIGINT (Ctrl+C), initiating shutdown");
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, initiating shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!("received Ctrl+C, initiating shutdown");
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Service crates at the configured level, dependencies at warn.
        let directives = [
            "colloquy",
            "colloquy_agent",
            "colloquy_anthropic",
            "colloquy_context",
            "colloquy_cost",
            "colloquy_gateway",
            "colloquy_storage",
        ]
        .map(|krate| format!("{krate}={log_level}"))
        .join(",");
        EnvFilter::new(format!("warn,{directives}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
