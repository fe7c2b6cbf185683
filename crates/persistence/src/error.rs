//! Persistence errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage task failed: {0}")]
    Task(String),
}

impl From<tempfile::PersistError> for PersistenceError {
    fn from(err: tempfile::PersistError) -> Self {
        PersistenceError::Io(err.error)
    }
}

impl From<tokio::task::JoinError> for PersistenceError {
    fn from(err: tokio::task::JoinError) -> Self {
        PersistenceError::Task(err.to_string())
    }
}

impl From<PersistenceError> for voice_shop_core::Error {
    fn from(err: PersistenceError) -> Self {
        voice_shop_core::Error::Persistence(err.to_string())
    }
}
