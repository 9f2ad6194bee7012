use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
