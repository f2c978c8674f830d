use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_flag, env_or_default, server::ServerConfig,
};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Where the entities live
#[derive(Clone, Debug)]
pub enum StorageConfig {
    /// Process-local maps; contents are lost on restart
    Memory,
    Postgres(PostgresConfig),
}

impl FromEnv for StorageConfig {
    /// `STORAGE` = `memory` (default) | `postgres`
    fn from_env() -> Result<Self, ConfigError> {
        let storage = env_or_default("STORAGE", "memory");

        match storage.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageConfig::Memory),
            "postgres" | "postgresql" => Ok(StorageConfig::Postgres(PostgresConfig::from_env()?)),
            other => Err(ConfigError::InvalidValue {
                key: "STORAGE".to_string(),
                details: format!("expected 'memory' or 'postgres', got '{}'", other),
            }),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Insert the sample users, tasks and todo lists at startup
    pub seed_data: bool,
    /// Comma-separated origins; `None` allows any origin
    pub cors_allowed_origin: Option<String>,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|origins| !origins.trim().is_empty());

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            seed_data: env_flag("SEED_DATA", false)?,
            cors_allowed_origin,
        })
    }
}
