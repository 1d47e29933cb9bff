//! ALM Binding Server
//!
//! Serves the project ALM binding API over HTTP.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alm_binding::{
    auth::{PermissionChecker, PgPermissionChecker, StaticPermissions},
    config::{AppConfig, DatabaseConfig, StoreBackend},
    db::{create_pool, run_migrations, DbPool},
    routes::build_router,
    seed::Seed,
    services::BindingService,
    state::AppState,
    store::{MemoryStore, PgStore, Store},
};

/// Initialize tracing/logging.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,alm_binding=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

type Backend = (Arc<dyn Store>, Arc<dyn PermissionChecker>, Option<DbPool>);

/// Connect the configured store and permission checker.
async fn open_backend(config: &AppConfig) -> anyhow::Result<Backend> {
    match config.store {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = create_pool(&db_config).await?;
            if config.run_migrations {
                run_migrations(&pool).await?;
            }
            Ok((
                Arc::new(PgStore::new(pool.clone())),
                Arc::new(PgPermissionChecker::new(pool.clone())),
                Some(pool),
            ))
        }
        StoreBackend::Memory => {
            let (store, permissions) = match &config.seed_file {
                Some(path) => Seed::from_file(Path::new(path)).await?.apply().await?,
                None => {
                    tracing::warn!("Memory store without seed file, no project can be bound");
                    (MemoryStore::new(), StaticPermissions::new())
                }
            };
            Ok((Arc::new(store), Arc::new(permissions), None))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting ALM binding server"
    );

    let app_config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid ALM_* configuration");
    })?;

    tracing::info!(
        host = %app_config.host,
        port = app_config.port,
        store = ?app_config.store,
        "Configuration loaded"
    );

    let (store, permissions, db_pool) = open_backend(&app_config).await?;
    let binding_service = BindingService::new(store, permissions);
    let state = AppState::new(db_pool, app_config.clone());

    let app = build_router(state, binding_service);

    let addr: SocketAddr = app_config.bind_address().parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
