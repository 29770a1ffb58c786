use anyhow::Result;
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use api::config::{ApiConfig, LogFormat, StoreBackend};
use api::observability::Observability;
use api::state::AppState;
use api::store::{ApplicationStore, InMemoryApplicationStore, PgApplicationStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init(LogFormat::from_env()?)?;
    let config = ApiConfig::from_env()?;

    let store: Arc<dyn ApplicationStore> = match &config.store {
        StoreBackend::Postgres(db) => {
            let pool = PgPoolOptions::new()
                .max_connections(db.max_connections)
                .connect(&db.connection_string)
                .await?;

            let store = PgApplicationStore::new(pool);
            store.migrate().await?;
            tracing::info!("Database connected and migrations applied");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory application store; records are lost on restart");
            Arc::new(InMemoryApplicationStore::new())
        }
    };

    let state = AppState::new(
        store,
        config.header_rules,
        config.missing_header_policy,
        obs.registry,
    );
    let app = api::app(state);

    tracing::info!("API server listening on {}", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
