use std::sync::Arc;

use tracing::info;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::manager::DatabaseManager;
use crate::database::prelude::Store;
use crate::database::{seed, MemoryStore, PgStore};
use crate::routes;
use crate::state::AppState;

/// Connects, migrates and seeds the store, then serves until Ctrl-C
pub async fn handle(config: AppConfig, memory: bool) -> anyhow::Result<()> {
    let tokens = TokenService::from_config(&config.security)?;
    let store = open_store(&config, memory).await?;

    let report = seed::seed(store.as_ref()).await?;
    info!(
        roles_created = report.roles_created,
        accounts_created = report.accounts_created,
        "Seed data checked"
    );

    let bind_addr = config.bind_addr();
    let environment = config.environment;
    let app = routes::router(AppState::new(store, tokens, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;
    info!("Phone review API listening on http://{} ({:?})", bind_addr, environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn open_store(config: &AppConfig, memory: bool) -> anyhow::Result<Arc<dyn Store>> {
    if memory {
        info!("Using in-memory store; data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Arc::new(PgStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
