use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use lifecycle::{LifecycleError, MissingField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Expected a list of users")]
    ExpectedList,

    #[error("Invalid user entry: {0}")]
    InvalidEntry(String),

    #[error("Missing field '{0}' in one of the users")]
    MissingField(&'static str),

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    #[error("Phone number '{0}' is already registered")]
    PhoneTaken(String),

    #[error("Query parameter 'userId' is required")]
    MissingUserIdQuery,

    #[error("User ID (_id) is required")]
    MissingUpdateId,

    #[error("User ID (_id) is required to delete")]
    MissingDeleteId,

    #[error("User not found")]
    NotFound,

    #[error("Email and password required")]
    CredentialsRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] LifecycleError),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<MissingField> for UserError {
    fn from(missing: MissingField) -> Self {
        UserError::MissingField(missing.0)
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::ExpectedList
            | UserError::InvalidEntry(_)
            | UserError::MissingField(_)
            | UserError::MissingUserIdQuery
            | UserError::MissingUpdateId
            | UserError::MissingDeleteId
            | UserError::CredentialsRequired => AppError::BadRequest(err.to_string()),
            UserError::Validation(errors) => errors.into(),
            UserError::EmailTaken(_) | UserError::PhoneTaken(_) => {
                AppError::Conflict(err.to_string())
            }
            UserError::NotFound => AppError::NotFound(err.to_string()),
            UserError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            UserError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
