//! Roles Domain
//!
//! Roles carry a permission list and two natural keys: the uppercase
//! `role_display_name` and the raw `role_name`. A live role may not share
//! either with another live role. Updates and soft deletes match on id
//! regardless of status.
//!
//! ```text
//! Handlers → RoleService → RoleRepository → MongoDB / in-memory
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{RoleError, RoleResult};
pub use handlers::ApiDoc;
pub use models::{CreateRole, Role, RoleKeys, RoleList, RoleView, UpdateRole};
pub use crate::mongodb::MongoRoleRepository;
pub use repository::{InMemoryRoleRepository, RoleRepository};
pub use service::{RoleService, default_display_offset};
