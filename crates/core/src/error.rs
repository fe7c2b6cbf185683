//! Error types shared across the workspace

use thiserror::Error;

/// Result alias using the core [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Why a speech-to-text attempt produced no usable transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecognitionFailure {
    /// Nothing was heard inside the listening window
    #[error("no speech detected before timeout")]
    Timeout,

    /// Audio was received but could not be understood
    #[error("speech was unintelligible")]
    Unintelligible,

    /// The recognition backend failed or was unreachable
    #[error("speech service error")]
    ServiceError,
}

/// Core errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Recognition failed: {0}")]
    Recognition(#[from] RecognitionFailure),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Narration error: {0}")]
    Narration(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short, stable label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Recognition(_) => "recognition",
            Error::Persistence(_) => "persistence",
            Error::Narration(_) => "narration",
            Error::Catalog(_) => "catalog",
            Error::Serialization(_) => "serialization",
            Error::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_failure_converts() {
        let err: Error = RecognitionFailure::Timeout.into();
        assert_eq!(err.kind(), "recognition");
        assert!(err.to_string().contains("timeout"));
    }
}
