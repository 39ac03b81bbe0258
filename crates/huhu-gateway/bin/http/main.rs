mod cli;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use huhu_core::Repository;
use huhu_gateway::{App, AppState};
use huhu_storage::{InMemoryRepository, SqliteConfig, SqliteRepository};
use huhu_telemetry::TelemetryConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::{StorageBackendArg, CLI};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let telemetry = TelemetryConfig::builder()
        .service_name("huhu-gateway")
        .format(config.log_format.into())
        .otlp_endpoint(config.otlp_endpoint.clone())
        .build();
    let _telemetry = huhu_telemetry::init(telemetry).context("failed to initialize telemetry")?;

    info!(
        port = config.port,
        storage_backend = %config.storage,
        "starting gateway"
    );

    let repository = open_repository(&config).await?;
    let state = AppState::new(Arc::clone(&repository), config.admin_api_key)
        .with_request_timeout(Duration::from_secs(config.request_timeout_secs));

    let listen_addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "starting gateway server");

    let served = axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("closing repository");
    repository.close().await;

    served.context("server error")?;
    info!("server exited gracefully");
    Ok(())
}

async fn open_repository(config: &CLI) -> anyhow::Result<Arc<dyn Repository>> {
    match config.storage {
        StorageBackendArg::Sqlite => {
            let sqlite = SqliteConfig::builder()
                .path(config.database_path.clone())
                .max_connections(config.max_connections)
                .build();
            let repository = SqliteRepository::connect(&sqlite)
                .await
                .with_context(|| format!("failed to open database {}", sqlite.path()))?;
            Ok(Arc::new(repository))
        }
        StorageBackendArg::InMemory => {
            warn!("using in-memory storage, jokes are lost on shutdown");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
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

    info!("shutting down server");
}
