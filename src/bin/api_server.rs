// src/bin/api_server.rs

use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trivia_api::infra::config::{self, StorageMode};
use trivia_api::{transport, MemoryTriviaStore, PgTriviaStore, TriviaStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trivia_api=debug,api_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Store Initialization ---
    let store: Arc<dyn TriviaStore> = match config::storage_mode()? {
        StorageMode::Postgres => {
            tracing::info!("> Connecting to Postgres and bootstrapping tables...");
            Arc::new(PgTriviaStore::connect().await?)
        }
        StorageMode::Memory => {
            tracing::warn!("> STORAGE_MODE=memory: data is lost on shutdown.");
            let store = if config::seed_categories()? {
                MemoryTriviaStore::seeded()
            } else {
                MemoryTriviaStore::new()
            };
            Arc::new(store)
        }
    };
    tracing::info!(backend = store.backend(), "> Store initialized.");

    // --- API Server Initialization ---
    let app = transport::http::create_app(transport::http::AppState::new(store));
    let addr = config::bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("> API server listening on http://{}", addr);
    tracing::info!("> Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("> Graceful shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("> Shutdown signal received (Ctrl+C)...");
}
