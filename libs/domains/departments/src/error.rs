use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use lifecycle::{LifecycleError, MissingField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DepartmentError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Department '{0}' already exists")]
    Duplicate(String),

    #[error("Department not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] LifecycleError),
}

pub type DepartmentResult<T> = Result<T, DepartmentError>;

impl From<MissingField> for DepartmentError {
    fn from(missing: MissingField) -> Self {
        DepartmentError::MissingField(missing.0)
    }
}

impl From<DepartmentError> for AppError {
    fn from(err: DepartmentError) -> Self {
        match err {
            DepartmentError::MissingField(_) => AppError::BadRequest(err.to_string()),
            DepartmentError::Validation(errors) => errors.into(),
            DepartmentError::Duplicate(_) => AppError::Conflict(err.to_string()),
            DepartmentError::NotFound => AppError::NotFound(err.to_string()),
            DepartmentError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for DepartmentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
