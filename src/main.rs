mod api_doc;
mod auth;
mod config;
mod error;
mod extractors;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::{Config, StoreBackend};
use state::AppState;
use store::{ContactStore, InMemoryContactStore, SpannerContactStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contacts_api=info,tower_http=info")),
        )
        .init();

    tracing::info!("contacts-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = build_store(&config).await?;
    let app = routes::router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind((config.service_host.as_str(), config.service_port))
        .await
        .with_context(|| {
            format!("Failed to bind {}:{}", config.service_host, config.service_port)
        })?;

    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("contacts-api stopped");
    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn ContactStore>> {
    match (config.store_backend, &config.spanner) {
        (StoreBackend::Spanner, Some(spanner)) => {
            Ok(Arc::new(SpannerContactStore::from_config(spanner).await?))
        }
        (StoreBackend::Spanner, None) => anyhow::bail!("Spanner store selected without Spanner configuration"),
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory contact store, data is lost on restart");
            Ok(Arc::new(InMemoryContactStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
