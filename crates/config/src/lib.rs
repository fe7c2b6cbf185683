//! Configuration management for the voice shopping assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (VOICE_SHOP__ prefix, `__` separated)
//! - A YAML catalog file, or the built-in seed catalog

pub mod catalog;
pub mod settings;

pub use catalog::{default_catalog, load_catalog};
pub use settings::{
    load_settings, NluConfig, ObservabilityConfig, ServerConfig, Settings, SpeechConfig,
    StoreConfig, SuggestionConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<voice_shop_core::Error> for ConfigError {
    fn from(err: voice_shop_core::Error) -> Self {
        ConfigError::InvalidValue {
            field: "catalog".to_string(),
            message: err.to_string(),
        }
    }
}
