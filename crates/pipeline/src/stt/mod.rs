//! Speech-to-text backends

mod http_backend;

pub use http_backend::{HttpSpeechToText, HttpSttConfig};

use std::sync::Arc;
use voice_shop_config::SpeechConfig;
use voice_shop_core::SpeechToText;

use crate::PipelineError;

/// Build the configured recognizer, or `None` when no service is set
pub fn create_stt(config: &SpeechConfig) -> Result<Option<Arc<dyn SpeechToText>>, PipelineError> {
    let Some(url) = &config.stt_url else {
        tracing::info!("No speech recognition service configured, voice commands disabled");
        return Ok(None);
    };

    let backend = HttpSpeechToText::new(HttpSttConfig {
        url: url.clone(),
        timeout_ms: config.stt_timeout_ms,
        ..Default::default()
    })?;

    Ok(Some(Arc::new(backend)))
}
