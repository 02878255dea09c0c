//! Items API - REST server

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use migration::Migrator;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StorageBackend};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = match &config.storage {
        StorageBackend::Postgres(pg_config) => {
            info!(
                max_connections = pg_config.max_connections,
                "Connecting to PostgreSQL"
            );
            let db = postgres::connect_from_config_with_retry(pg_config.clone(), None).await?;

            let status = postgres::check_health_detailed(&db).await;
            info!(
                healthy = status.healthy,
                response_time_ms = status.response_time_ms,
                "PostgreSQL connection established"
            );

            if config.run_migrations {
                postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
            }
            Some(Arc::new(db))
        }
        StorageBackend::Memory => {
            info!("Using in-memory item storage; data is lost on restart");
            None
        }
    };

    let state = AppState { config, db };

    let api_routes = api::routes(&state).merge(health_router(state.config.app.clone()));
    let app = create_router::<openapi::ApiDoc>(api_routes, &state.config.environment)?;

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        address = %state.config.server.address(),
        "Starting Items API"
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, async move {
        if let Some(db) = state.db {
            info!("Shutting down: closing PostgreSQL pool");
            if let Err(e) = db.close_by_ref().await {
                tracing::warn!(error = %e, "Failed to close PostgreSQL pool");
            }
        }
    })
    .await?;

    info!("Items API shutdown complete");
    Ok(())
}
