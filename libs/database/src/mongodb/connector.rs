use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Connect using a MongoConfig and verify the server answers a ping
///
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let client = connect_from_config(&MongoConfig::default()).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!(url = %config.url, "Attempting to connect to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.app_name = config.app_name.clone();

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect from config, retrying with exponential backoff on failure
///
/// Passing `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    match retry_config {
        Some(policy) => retry_with_backoff(|| connect_from_config(config), policy).await,
        None => retry(|| connect_from_config(config)).await,
    }
}

/// Close the client's pools and monitors
///
/// Waits for any outstanding sessions and cursors to be dropped first.
pub async fn disconnect(client: Client) {
    client.shutdown().await;
    info!("MongoDB client shut down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_from_config() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::with_database(url, "connector_test");
        assert!(connect_from_config(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let config = MongoConfig::new("not-a-mongo-url");
        let result = connect_from_config_with_retry(
            &config,
            Some(RetryConfig::new().with_max_retries(0)),
        )
        .await;
        assert!(matches!(result, Err(DatabaseError::Mongo(_))));
    }

    #[tokio::test]
    async fn test_disconnect_completes_without_server() {
        let client = Client::with_uri_str("mongodb://localhost:1").await.unwrap();
        let closed = tokio::time::timeout(Duration::from_secs(5), disconnect(client)).await;
        assert!(closed.is_ok());
    }
}
