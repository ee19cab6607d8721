use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use garden_api::{AppState, create_router};
use garden_auth::{JwtConfig, JwtService, SecretHasher};
use garden_common::{
    config::{AppConfig, StoreBackend},
    database::{ensure_schema, health_check, init_pool},
    store::{MemoryStore, PlantRepository, UserRepository},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting garden API");

    let config = AppConfig::from_env()?;

    let jwt_service = JwtService::new(JwtConfig::new(
        config.jwt_secret.clone(),
        config.jwt_expiry_seconds,
    ));
    let hasher = SecretHasher::default();

    let app_state = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = init_pool(&config.database())
                .await
                .context("Failed to create database pool")?;

            // Check database connectivity
            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            ensure_schema(&pool).await?;

            AppState::new(
                Arc::new(UserRepository::new(pool.clone())),
                Arc::new(PlantRepository::new(pool)),
                jwt_service,
                hasher,
                config.app_env,
            )
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on shutdown");
            AppState::in_memory(MemoryStore::new(), jwt_service, hasher, config.app_env)
        }
    };

    let app = create_router(app_state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Garden API listening on {} ({:?})", address, config.app_env);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Garden API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
