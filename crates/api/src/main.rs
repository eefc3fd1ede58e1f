//! Staybook - booking and availability service
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use staybook_api::utils::logging::init_tracing;
use staybook_api::{router, AppContext};
use staybook_infra::config;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before the config reads the environment.
    let dotenv = dotenvy::dotenv();

    let config = config::load_or_default();
    init_tracing(&config.log_level);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "no .env file loaded"),
    }

    let bind_addr = config.server.bind_addr.clone();
    let context = AppContext::new(config).context("failed to initialise application context")?;
    let app = router(Arc::new(context));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "staybook listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("staybook stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
