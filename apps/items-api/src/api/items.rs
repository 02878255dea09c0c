//! Items routes backed by the configured storage

use axum::Router;
use domain_items::{InMemoryItemRepository, ItemService, PgItemRepository, handlers};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    match &state.db {
        Some(db) => handlers::router(ItemService::new(PgItemRepository::new(Arc::clone(db)))),
        None => handlers::router(ItemService::new(InMemoryItemRepository::new())),
    }
}
