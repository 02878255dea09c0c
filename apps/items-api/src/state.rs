//! Application state management

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when items live in memory
    pub db: Option<Arc<DatabaseConnection>>,
}
