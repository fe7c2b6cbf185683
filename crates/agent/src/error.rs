//! Agent errors

use thiserror::Error;
use voice_shop_text_processing::TextProcessingError;

/// Failures while building the assistant
///
/// Command processing itself never fails; every path produces a reply.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("State error: {0}")]
    State(#[from] voice_shop_core::Error),

    #[error("Language configuration error: {0}")]
    Language(#[from] TextProcessingError),
}
