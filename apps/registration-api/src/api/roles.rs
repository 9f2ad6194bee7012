use axum::Router;
use domain_roles::{MongoRoleRepository, RoleService, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Role routes, with timestamps rendered in the configured offset
pub fn router(state: &AppState) -> Router {
    let repository = MongoRoleRepository::new(&state.db);
    let service = RoleService::new(repository)
        .with_display_offset(state.config.registry.role_display_offset);
    handlers::router(service)
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoRoleRepository::new(db).init_indexes().await?;
    Ok(())
}
