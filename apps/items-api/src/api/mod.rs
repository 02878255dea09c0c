//! API routes module

pub mod health;
pub mod items;
pub mod ping;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .merge(ping::router())
        .merge(health::router(state.clone()))
}
