use std::sync::Arc;

use anyhow::Context;
use baggage_core::{ClientService, ClientStore, MemoryClientStore};
use baggage_server::{telemetry, Config, SledClientStore};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    telemetry::init_tracing();

    let store: Arc<dyn ClientStore> = match &config.database {
        Some(path) => {
            info!(path = %path.display(), "opening client database");
            Arc::new(SledClientStore::open(path).context("failed to open client database")?)
        }
        None => {
            warn!("no database configured, clients are kept in memory");
            Arc::new(MemoryClientStore::new())
        }
    };

    let app = baggage_server::router(ClientService::new(store), config.body_limit);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "backend API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("backend API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
