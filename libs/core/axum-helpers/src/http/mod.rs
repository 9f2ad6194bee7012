//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//! - The `{"message"}` acknowledgement body
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer_from_env, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors_layer_from_env()?);
//! ```

pub mod cors;
pub mod message;
pub mod security;

pub use cors::{CORS_ALLOWED_ORIGIN, cors_layer_from_env, create_cors_layer};
pub use message::MessageResponse;
pub use security::security_headers;
