//! Speech processing traits

use crate::{RecognitionFailure, Result};
use async_trait::async_trait;

/// Speech-to-Text interface
///
/// Implementations:
/// - `HttpSpeechToText` - posts audio to a recognition sidecar
///
/// # Example
///
/// ```ignore
/// let stt: Arc<dyn SpeechToText> = Arc::new(HttpSpeechToText::new(config)?);
/// match stt.transcribe(&audio).await {
///     Ok(text) => println!("heard: {}", text),
///     Err(failure) => println!("no transcript: {}", failure),
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribe one complete utterance
    async fn transcribe(&self, audio: &[u8]) -> std::result::Result<String, RecognitionFailure>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Text-to-Speech interface
///
/// Callers spawn `speak` and never wait on its result, so implementations
/// may block for as long as playback takes.
#[async_trait]
pub trait Narrator: Send + Sync + 'static {
    async fn speak(&self, text: &str) -> Result<()>;

    fn name(&self) -> &str;
}
