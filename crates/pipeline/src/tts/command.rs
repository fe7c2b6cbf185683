//! Command-line narration
//!
//! Speaks text by running an external TTS program (`espeak`, `say`, ...)
//! with the text as its last argument.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use voice_shop_core::{Error, Narrator, Result};

/// Runs `program args... <text>` for every utterance
#[derive(Debug, Clone)]
pub struct CommandNarrator {
    program: String,
    args: Vec<String>,
}

impl CommandNarrator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl Narrator for CommandNarrator {
    async fn speak(&self, text: &str) -> Result<()> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::Narration(format!("Failed to spawn '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Narration(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Writes narration to the log only
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNarrator;

#[async_trait]
impl Narrator for LogNarrator {
    async fn speak(&self, text: &str) -> Result<()> {
        tracing::info!(text, "Narration");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
