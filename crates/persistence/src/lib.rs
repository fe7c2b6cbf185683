//! State persistence for the voice shopping assistant
//!
//! Provides whole-document storage behind the core `StateStore` trait:
//! - `JsonFileStore` - one JSON document on disk, replaced atomically on save
//! - `InMemoryStore` - nothing survives a restart, used for tests and demos

pub mod error;
pub mod file;
pub mod memory;

pub use error::PersistenceError;
pub use file::JsonFileStore;
pub use memory::InMemoryStore;
