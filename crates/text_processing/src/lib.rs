//! Text processing for shopping commands
//!
//! This crate turns a raw utterance into a [`ParsedCommand`]:
//! - **Intent Classification**: ordered keyword aliases, non-English groups first
//! - **Slot Extraction**: quantity, catalog item, brand, type, organic flag, price range
//! - **Small talk**: greeting and thanks detection for unrecognized input
//!
//! # Example
//!
//! ```ignore
//! use voice_shop_text_processing::CommandParser;
//!
//! let parser = CommandParser::new();
//! let command = parser.parse("add two milk", &catalog);
//! assert_eq!(command.quantity, 2);
//! ```
//!
//! [`ParsedCommand`]: voice_shop_core::ParsedCommand

pub mod intent;
pub mod slot_extraction;

mod error;
mod pipeline;

pub use error::{Result, TextProcessingError};
pub use intent::{IntentClassifier, Language, SmallTalk};
pub use pipeline::CommandParser;
pub use slot_extraction::{ExtractedSlots, SlotExtractor};
