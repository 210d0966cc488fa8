use thiserror::Error;
use validator::ValidationErrors;

use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Filters that cannot be turned into a query.
    #[error("Invalid filters: {0}")]
    QueryBuild(String),

    /// The backend could not be reached or rejected the query.
    #[error("Backend error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::QueryBuild(message) => ServiceError::QueryBuild(message),
            RepositoryError::Transport(message) | RepositoryError::ConnectionError(message) => {
                ServiceError::Transport(message)
            }
            RepositoryError::Decode(message) | RepositoryError::Unexpected(message) => {
                ServiceError::Internal(message)
            }
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidRequest(err.to_string())
    }
}
