use axum::Router;
use domain_departments::{DepartmentService, MongoDepartmentRepository, handlers};
use mongodb::Database;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoDepartmentRepository::new(&state.db);
    let service = DepartmentService::new(repository)
        .with_update_mode(state.config.registry.department_update_mode);
    handlers::router(service)
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoDepartmentRepository::new(db).init_indexes().await?;
    Ok(())
}
