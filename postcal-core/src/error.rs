//! Error types for postcal.

use thiserror::Error;

/// Errors that can occur in postcal operations.
#[derive(Error, Debug)]
pub enum PostcalError {
    #[error("Could not load saved posts: {0}")]
    PersistenceRead(String),

    #[error("Could not save posts: {0}")]
    PersistenceWrite(String),

    #[error("Rejected {rejected} of {total} imported records")]
    MalformedImport { rejected: usize, total: usize },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Post #{0} not found")]
    NotFound(u64),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PostcalError {
    fn from(e: serde_json::Error) -> Self {
        PostcalError::Serialization(e.to_string())
    }
}

/// Result type alias for postcal operations.
pub type PostcalResult<T> = Result<T, PostcalError>;
