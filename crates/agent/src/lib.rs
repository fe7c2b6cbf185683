//! Shopping List Assistant
//!
//! Features:
//! - Command dispatch from parsed intent and slots
//! - Add with merge by item identity, remove, clear and categorized listing
//! - Catalog search with brand, type, organic and price filters
//! - Suggestions from substitutes, categories, season, history and sales
//! - Per-user serialization with whole-document persistence and rollback
//! - Fire-and-forget narration of every response

pub mod assistant;
pub mod clock;
pub mod search;
pub mod suggestions;

mod error;

pub use assistant::{AssistantConfig, ShoppingAssistant};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::AgentError;
pub use search::{search_catalog, SearchQuery};
pub use suggestions::SuggestionEngine;
