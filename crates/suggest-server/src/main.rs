mod config;
mod error;
mod server;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use server::AppState;
use suggest_common::artifact::load_artifacts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting account suggestion server");

    let config = Config::from_env()?;
    info!(
        model_path = %config.model_path.display(),
        account_map_path = %config.account_map_path.display(),
        port = config.port,
        "configuration loaded"
    );

    // Artifact problems are logged and leave the server up but not ready.
    let artifacts = load_artifacts(&config.model_path, &config.account_map_path);
    let model_loaded = artifacts.adapter.is_ready();

    let app = server::router(AppState::new(artifacts.adapter, artifacts.directory));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, model_loaded, "HTTP server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
        })?;

    info!("HTTP server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
