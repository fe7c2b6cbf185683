//! Core traits and types for the voice shopping assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Catalog types (products, substitutes, seasonal items, sales)
//! - Shopping list types (line items, per-user state, history)
//! - Parsed command types (intent, slots, price filters)
//! - Core traits for pluggable collaborators (STT, narration, state storage)
//! - Error types

pub mod catalog;
pub mod command;
pub mod document;
pub mod error;
pub mod shopping;
pub mod traits;

pub use catalog::{Catalog, Product, ProductMatch, Sale, Season};
pub use command::{Intent, ParsedCommand, PriceFilter};
pub use document::StateDocument;
pub use error::{Error, RecognitionFailure, Result};
pub use shopping::{ItemIdentity, LineItem, UserState, UNCATEGORIZED};

// Trait re-exports
pub use traits::{Narrator, SpeechToText, StateStore};
