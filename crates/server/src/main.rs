use std::sync::Arc;

use anyhow::Context;
use copilot_demo_server::{AppState, ServerConfig, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("failed to load .env file");
        }
    }
    init_tracing()?;

    info!("starting copilot demo server");
    let config =
        ServerConfig::from_env().context("failed to load server config from environment")?;

    if config.directory.credentials().is_none() {
        warn!("directory credentials are not configured, /users will report an error");
    }
    info!(
        log_folder = %config.log_folder.display(),
        deployed_base_url = %config.deployed_base_url,
        "configuration loaded"
    );

    let state = Arc::new(AppState::new(&config));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
