use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The filter set could not be compiled into a query.
    #[error("Query build error: {0}")]
    QueryBuild(String),

    /// The query port failed to execute a query.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A stored record could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::ClosedConnection => RepositoryError::ConnectionError(
                        format!("Connection closed: {message}"),
                    ),
                    _ => RepositoryError::Transport(message),
                }
            }

            DieselError::QueryBuilderError(e) => {
                RepositoryError::QueryBuild(format!("Query builder error: {e}"))
            }

            DieselError::SerializationError(e) => {
                RepositoryError::QueryBuild(format!("Serialization error: {e}"))
            }

            DieselError::DeserializationError(e) => {
                RepositoryError::Decode(format!("Deserialization error: {e}"))
            }

            DieselError::NotFound => RepositoryError::Transport("Row not found".to_string()),

            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(format!("Invalid record JSON: {err}"))
    }
}
