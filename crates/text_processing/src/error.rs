//! Error types for text processing

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextProcessingError>;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}
