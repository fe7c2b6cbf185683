//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use voice_shop_agent::ShoppingAssistant;
use voice_shop_config::Settings;
use voice_shop_core::SpeechToText;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub assistant: Arc<ShoppingAssistant>,
    /// Unset when no recognition service is configured
    pub stt: Option<Arc<dyn SpeechToText>>,
}

impl AppState {
    pub fn new(settings: Settings, assistant: ShoppingAssistant) -> Self {
        Self {
            settings: Arc::new(settings),
            assistant: Arc::new(assistant),
            stt: None,
        }
    }

    pub fn with_stt(mut self, stt: Arc<dyn SpeechToText>) -> Self {
        self.stt = Some(stt);
        self
    }
}
