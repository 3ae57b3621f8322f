//! Local HTTP proxy for the RuStore backend.
//!
//! Listens on a local port and maps a handful of REST routes onto the
//! `rustore-client` operations. There is no CLI; configuration comes
//! from `rustore-proxy.toml` and a few environment variables.

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{config::ProxyConfig, error::Result};

mod config;
mod error;
mod logging;
mod response;
mod routes;

#[tokio::main]
async fn main() {
    logging::setup_logging();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ProxyConfig::load()?;
    let client = config.client_config().build()?;

    let app = routes::router(client);
    let listener = TcpListener::bind(&config.listen).await?;
    info!("Listening on {}", listener.local_addr()?);
    info!("Forwarding to {}", config.upstream_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
    }
}
