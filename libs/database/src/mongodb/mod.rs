//! MongoDB connector and utilities

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, DEFAULT_URL, MongoConfig};
pub use connector::{connect_from_config, connect_from_config_with_retry, disconnect};
pub use health::{HealthStatus, check_health};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
