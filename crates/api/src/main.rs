use anyhow::Result;
use fleet_telemetry_api::{
    app,
    config::{Config, StoreBackend},
    middleware,
};
use persistence::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {e}"))?;

    info!("Starting Fleet Telemetry API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;

    let app = app::create_app(config.clone(), Arc::clone(&store));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match config.database.backend {
        StoreBackend::Postgres => {
            let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

            info!("Running database migrations...");
            persistence::db::run_migrations(&pool).await?;
            info!("Migrations completed");

            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory document store; data is lost on restart");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
}
