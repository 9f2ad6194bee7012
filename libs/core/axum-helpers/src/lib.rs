//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware, the message body
//! - **[`errors`]**: the JSON error envelope and error codes
//! - **[`extractors`]**: request extractors that reject with [`AppError`]
//!
//! ```ignore
//! use axum_helpers::{create_router, create_production_app, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes).await?
//!     .merge(health_router(core_config::app_info!()));
//! create_production_app(router, &server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{MessageResponse, cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::JsonBody;
