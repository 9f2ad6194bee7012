use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use lifecycle::{LifecycleError, MissingField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Permissions must be an array of objects")]
    InvalidPermissions,

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Role '{0}' already exists")]
    Duplicate(String),

    #[error("Role not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] LifecycleError),
}

pub type RoleResult<T> = Result<T, RoleError>;

impl From<MissingField> for RoleError {
    fn from(missing: MissingField) -> Self {
        RoleError::MissingField(missing.0)
    }
}

impl From<RoleError> for AppError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::MissingField(_) | RoleError::InvalidPermissions => {
                AppError::BadRequest(err.to_string())
            }
            RoleError::Validation(errors) => errors.into(),
            RoleError::Duplicate(_) => AppError::Conflict(err.to_string()),
            RoleError::NotFound => AppError::NotFound(err.to_string()),
            RoleError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for RoleError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
