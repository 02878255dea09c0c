//! Readiness endpoint. Liveness (`/health`) comes from `axum_helpers::health_router`.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

/// `200` once the storage backend answers, `503` otherwise.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db = state.db.as_ref();
    let storage: HealthCheckFuture<'_> = Box::pin(async move {
        match db {
            Some(db) => database::postgres::check_health(db)
                .await
                .map_err(|e| e.to_string()),
            // In-memory storage cannot be unreachable.
            None => Ok(()),
        }
    });

    run_health_checks(vec![("storage", storage)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment, StorageBackend};
    use axum::body::Body;
    use axum::http::Request;
    use core_config::{app_info, server::ServerConfig};
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(db: Option<sea_orm::DatabaseConnection>) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                environment: Environment::Development,
                server: ServerConfig::default(),
                storage: StorageBackend::Memory,
                run_migrations: false,
            },
            db: db.map(Arc::new),
        }
    }

    async fn fetch_ready(state: AppState) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_memory_backend_is_always_ready() {
        let (status, body) = fetch_ready(state(None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["storage"], "connected");
    }

    #[tokio::test]
    async fn test_reachable_database_is_ready() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let (status, body) = fetch_ready(state(Some(db))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["storage"], "connected");
    }
}
