//! Speech backends for the voice shopping assistant
//!
//! Implements the core speech traits:
//! - `HttpSpeechToText` - sends recorded audio to a recognition sidecar over HTTP
//! - `CommandNarrator` - speaks responses through an external TTS program
//! - `LogNarrator` - writes responses to the log instead of speaking them

pub mod stt;
pub mod tts;

pub use stt::{create_stt, HttpSpeechToText, HttpSttConfig};
pub use tts::{create_narrator, CommandNarrator, LogNarrator};

use thiserror::Error;

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Narrator error: {0}")]
    Narrator(String),
}
