use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};
use mongodb::Database;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    handlers::router(UserService::new(repository))
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoUserRepository::new(db).init_indexes().await?;
    Ok(())
}
