//! Configuration for Items API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_flag, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Where items are kept.
#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PostgresConfig),
    /// Process-local map; contents are lost on restart
    Memory,
}

impl FromEnv for StorageBackend {
    fn from_env() -> Result<Self, ConfigError> {
        let kind = env_or_default("ITEMS_STORAGE", "postgres");

        match kind.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres(PostgresConfig::from_env()?)),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::ParseError {
                key: "ITEMS_STORAGE".to_string(),
                details: format!("expected 'postgres' or 'memory', got '{}'", other),
            }),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageBackend,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            storage: StorageBackend::from_env()?,
            run_migrations: env_flag("RUN_MIGRATIONS", true)?,
        })
    }
}
