//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Language groups the classifier ships aliases for
pub const SUPPORTED_LANGUAGES: &[&str] = &["es", "fr", "de", "hi"];

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerConfig,

    /// State document storage
    #[serde(default)]
    pub store: StoreConfig,

    /// Command understanding
    #[serde(default)]
    pub nlu: NluConfig,

    #[serde(default)]
    pub suggestions: SuggestionConfig,

    /// Speech recognition and narration backends
    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_store()?;
        self.validate_nlu()?;
        self.validate_suggestions()?;
        self.validate_speech()?;

        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() && server.cors_enabled && server.cors_origins.is_empty()
        {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured. \
                 Any origin will be allowed."
            );
        }

        Ok(())
    }

    fn validate_store(&self) -> Result<(), ConfigError> {
        if !self.store.in_memory && self.store.path.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "store.path must be set unless store.in_memory is enabled".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_nlu(&self) -> Result<(), ConfigError> {
        for lang in &self.nlu.languages {
            if !SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "nlu.languages".to_string(),
                    message: format!(
                        "Unsupported language '{}', expected one of {:?}",
                        lang, SUPPORTED_LANGUAGES
                    ),
                });
            }
        }

        Ok(())
    }

    fn validate_suggestions(&self) -> Result<(), ConfigError> {
        let s = &self.suggestions;

        if s.max_suggestions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "suggestions.max_suggestions".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if s.shown_in_response > s.max_suggestions {
            return Err(ConfigError::InvalidValue {
                field: "suggestions.shown_in_response".to_string(),
                message: format!(
                    "Cannot be larger than max_suggestions ({})",
                    s.max_suggestions
                ),
            });
        }

        if s.suggest_triggers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "suggestions.suggest_triggers".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        let speech = &self.speech;

        if speech.stt_url.is_some() && speech.stt_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "speech.stt_timeout_ms".to_string(),
                message: "Must be at least 1ms when a recognition service is configured"
                    .to_string(),
            });
        }

        if let Some(command) = &speech.narrator_command {
            if command.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "speech.narrator_command".to_string(),
                    message: "Command cannot be blank".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins, empty allows any
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// State storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON state document location
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Keep state in memory only (nothing survives a restart)
    #[serde(default)]
    pub in_memory: bool,

    /// YAML catalog used when the stored document has none.
    /// Falls back to the built-in catalog when unset.
    #[serde(default)]
    pub seed_catalog: Option<String>,
}

fn default_store_path() -> String {
    "data/shopping_state.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            in_memory: false,
            seed_catalog: None,
        }
    }
}

/// Command understanding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluConfig {
    /// Language alias groups checked before English, in order
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

fn default_languages() -> Vec<String> {
    SUPPORTED_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
        }
    }
}

/// Suggestion engine limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Suggestions kept after deduplication
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Suggestions mentioned in an add confirmation
    #[serde(default = "default_shown_in_response")]
    pub shown_in_response: usize,

    /// History entries considered as candidates
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Random products sampled per category on the list
    #[serde(default = "default_category_samples")]
    pub category_samples: usize,

    /// History entries used as triggers for the suggest intent
    #[serde(default = "default_suggest_triggers")]
    pub suggest_triggers: usize,
}

fn default_max_suggestions() -> usize {
    5
}
fn default_shown_in_response() -> usize {
    3
}
fn default_history_window() -> usize {
    5
}
fn default_category_samples() -> usize {
    2
}
fn default_suggest_triggers() -> usize {
    3
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            shown_in_response: default_shown_in_response(),
            history_window: default_history_window(),
            category_samples: default_category_samples(),
            suggest_triggers: default_suggest_triggers(),
        }
    }
}

/// Speech backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the recognition service; voice commands are rejected when unset
    #[serde(default)]
    pub stt_url: Option<String>,

    #[serde(default = "default_stt_timeout_ms")]
    pub stt_timeout_ms: u64,

    /// Speak every response
    #[serde(default = "default_true")]
    pub narration_enabled: bool,

    /// External TTS program; responses are only logged when unset
    #[serde(default)]
    pub narrator_command: Option<String>,

    /// Arguments passed before the response text
    #[serde(default)]
    pub narrator_args: Vec<String>,
}

fn default_stt_timeout_ms() -> u64 {
    5000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_url: None,
            stt_timeout_ms: default_stt_timeout_ms(),
            narration_enabled: true,
            narrator_command: None,
            narrator_args: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,

    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from files and environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("VOICE_SHOP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
