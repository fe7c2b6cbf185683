//! Narration backends

mod command;

pub use command::{CommandNarrator, LogNarrator};

use std::sync::Arc;
use voice_shop_config::SpeechConfig;
use voice_shop_core::Narrator;

/// Build the configured narrator, or `None` when narration is disabled
pub fn create_narrator(config: &SpeechConfig) -> Option<Arc<dyn Narrator>> {
    if !config.narration_enabled {
        return None;
    }

    match &config.narrator_command {
        Some(program) => Some(Arc::new(CommandNarrator::new(
            program.clone(),
            config.narrator_args.clone(),
        ))),
        None => Some(Arc::new(LogNarrator)),
    }
}
