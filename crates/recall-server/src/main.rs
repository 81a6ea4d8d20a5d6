//! # Recall Server
//!
//! Main entry point: loads configuration, wires the module, and serves the
//! REST API until Ctrl+C or SIGTERM.

use recall_config::{AppConfig, ConfigLoader, ObservabilityConfig};
use recall_core::{RecallError, RecallResult};
use recall_rest::{create_router, AppState};
use recall_server::di::{build_app_module, InfrastructureResolver};
use recall_server::startup::{init_logging, print_banner, print_startup_info};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting Recall Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> RecallResult<()> {
    let module = build_app_module(&config).await?;

    let app_state = AppState::from_module(module.as_ref());
    let router = create_router(app_state, &config.server);

    let rest_addr = config.server.rest_addr();
    print_startup_info(&rest_addr, module.cache().is_enabled());

    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .map_err(|e| RecallError::Internal(format!("Failed to bind REST: {}", e)))?;

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RecallError::Internal(format!("REST server error: {}", e)));

    module.database_pool().close().await;
    served?;

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
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
