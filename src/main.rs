mod api;
mod app_state;
mod config;
mod core;
mod domain;
mod errors;
mod logging;
mod routes;

#[cfg(test)]
mod testutils;

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{info, warn};

use crate::app_state::build_app_state;
use crate::config::GatewayConfig;
use crate::core::client::cluster_registry::ClusterRegistry;

/// How long in-flight requests may run after a shutdown signal.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present (ignored otherwise)
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env()?;
    let _guard = logging::init(&config.log_dir);

    // No partial registry: a single bad kubeconfig stops the process
    let registry = ClusterRegistry::init(&config)
        .await
        .context("failed to initialize cluster registry")?;
    if registry.is_empty() {
        warn!("No clusters configured, every request will fail with cluster not found");
    } else {
        info!("{} cluster(s) registered: {:?}", registry.len(), registry.cluster_names());
    }

    let app = routes::app_router().with_state(build_app_state(Arc::new(registry)));

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!("Listening on {}", config.listen_addr);

    let stop = Arc::new(Notify::new());
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown({
            let stop = Arc::clone(&stop);
            async move { stop.notified().await }
        })
        .into_future();
    tokio::pin!(serve);

    tokio::select! {
        res = &mut serve => res?,
        _ = shutdown_signal() => {
            info!("Shutdown signal received, draining connections");
            stop.notify_one();
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, serve).await {
                Ok(res) => res?,
                Err(_) => warn!("Connections still open after {:?}, exiting", SHUTDOWN_TIMEOUT),
            }
        }
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
