use chrono::FixedOffset;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use domain_departments::DepartmentUpdateMode;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Registry behaviour that differs between deployments
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Offset role timestamps are rendered in
    pub role_display_offset: FixedOffset,
    pub department_update_mode: DepartmentUpdateMode,
}

impl FromEnv for RegistryConfig {
    /// - ROLE_DISPLAY_UTC_OFFSET: defaults to +05:30
    /// - DEPARTMENT_UPDATE_MODE: `soft_delete` (default) or `apply_changes`
    fn from_env() -> Result<Self, ConfigError> {
        let role_display_offset = env_parse("ROLE_DISPLAY_UTC_OFFSET", "+05:30")?;
        let department_update_mode = env_parse("DEPARTMENT_UPDATE_MODE", "soft_delete")?;

        Ok(Self {
            role_display_offset,
            department_update_mode,
        })
    }
}

/// Application configuration composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub registry: RegistryConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let registry = RegistryConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            registry,
            environment,
        })
    }
}
