//! Parsed command types

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user wants done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Add,
    Remove,
    Show,
    Find,
    Suggest,
    Clear,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Add => "add",
            Intent::Remove => "remove",
            Intent::Show => "show",
            Intent::Find => "find",
            Intent::Suggest => "suggest",
            Intent::Clear => "clear",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl PriceFilter {
    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn accepts(&self, price: f64) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

/// One utterance after classification and slot extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub intent: Intent,
    pub item: Option<String>,
    /// Always at least 1
    pub quantity: u32,
    pub price: Option<PriceFilter>,
    pub brand: Option<String>,
    pub variant: Option<String>,
    pub organic: bool,
}
