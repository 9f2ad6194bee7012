use axum::routing::get;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const WELCOME: &str = "Welcome to User Registration API!";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(state.config.app))
        .route("/", get(|| async { WELCOME }));

    info!(
        department_update_mode = %state.config.registry.department_update_mode,
        "Starting User Registration API (30s shutdown timeout)"
    );

    let server = state.config.server.clone();
    let mongo_client = state.mongo_client.clone();
    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        database::mongodb::disconnect(mongo_client).await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("User Registration API shutdown complete");
    Ok(())
}
