//! # Estate Cloud Server
//!
//! Loads configuration, wires the store, cache and services, and serves the
//! REST API until Ctrl+C or SIGTERM.

use anyhow::Context;
use estate_config::{AppConfig, ConfigLoader};
use estate_core::telemetry::init_logging;
use estate_rest::create_router;
use estate_server::{
    di::AppContainer,
    startup::{print_banner, print_startup_info},
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_loader =
        ConfigLoader::from_default_location().context("Failed to load configuration")?;
    let environment = config_loader.environment().to_owned();
    let config = config_loader.into_config();

    init_logging(
        &config.observability.log_level,
        config.observability.log_format,
    );
    print_banner();
    info!(profile = %environment, "Configuration loaded");

    if let Err(e) = run(config).await {
        error!("Application error: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let container = AppContainer::build(&config)
        .await
        .context("Failed to build application components")?;

    let router = create_router(container.app_state(), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    print_startup_info(&config, container.cache_backend());

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Release the pool and the sweeper even if the server loop failed.
    container.shutdown().await;
    served.context("REST server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
