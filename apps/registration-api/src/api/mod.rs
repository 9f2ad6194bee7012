//! API routes, nested under `/api` by `axum_helpers::create_router`

pub mod departments;
pub mod health;
pub mod roles;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .merge(roles::router(state))
        .merge(departments::router(state))
        .merge(health::router(state.clone()))
}

/// Create the non-unique indexes every collection relies on
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(&state.db).await?;
    roles::init_indexes(&state.db).await?;
    departments::init_indexes(&state.db).await?;
    Ok(())
}
