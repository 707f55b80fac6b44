//! Payoff Engine Binary
//!
//! Serves the payoff JSON API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin payoff-engine
//! ```
//!
//! # Environment Variables
//!
//! - `PAYOFF_CONFIG`: Config file path (default: config.yaml, defaults if absent)
//! - `RUST_LOG`: Log filter (overrides `logging.level`)

use std::net::SocketAddr;

use anyhow::Context;
use payoff_engine::config::load_config;
use payoff_engine::presets::PresetLibrary;
use payoff_engine::server::{AppState, create_router};
use payoff_engine::telemetry::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("PAYOFF_CONFIG").ok();
    let config = load_config(config_path.as_deref()).context("loading configuration")?;

    init_tracing(&config.logging);
    tracing::info!("Starting Payoff Engine");
    tracing::info!(
        http_port = config.server.http_port,
        grid_samples = config.grid.samples,
        chart_style = %config.chart.style,
        "Configuration loaded"
    );

    let presets =
        PresetLibrary::load(config.presets.path.as_deref()).context("loading preset library")?;
    tracing::info!(presets = presets.len(), "Preset library ready");

    let app = create_router(AppState::new(&config, presets));

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()
        .context("parsing bind address")?;

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/v1/presets");
    tracing::info!("  GET  /api/v1/presets/{{name}}");
    tracing::info!("  POST /api/v1/payoff");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Payoff engine stopped");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
