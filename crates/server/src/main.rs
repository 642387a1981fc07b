// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use config::{Args, LcdConfig};
use server::{app, logging, metrics, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let env_file_loaded = LcdConfig::load_env_file(&args.env_file)?;
    let config = LcdConfig::from_env()?;

    logging::init_with_config(logging::LoggingConfig::from_config(&config.log))?;
    if env_file_loaded {
        tracing::info!("Loaded environment from {}", args.env_file);
    }

    if config.metrics.enabled {
        metrics::init(&config.metrics.prometheus_prefix)?;
        tracing::info!(prefix = %config.metrics.prometheus_prefix, "Metrics enabled");
    }

    let addr = config.express.bind_address();
    let state = AppState::new(config)?;
    tracing::info!(
        types = state.codec.registry().tags().len(),
        "Codec registry sealed"
    );

    let app = app::create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
