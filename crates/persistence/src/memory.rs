//! In-memory state store
//!
//! Keeps the last saved document in memory. Nothing survives a restart.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use voice_shop_core::{Result, StateDocument, StateStore};

#[derive(Default)]
pub struct InMemoryStore {
    document: RwLock<StateDocument>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `document`
    pub fn with_document(document: StateDocument) -> Self {
        Self {
            document: RwLock::new(document),
            saves: AtomicUsize::new(0),
        }
    }

    /// Copy of the last saved document
    pub fn snapshot(&self) -> StateDocument {
        self.document.read().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StateStore for InMemoryStore {
    async fn load_all(&self) -> Result<StateDocument> {
        Ok(self.document.read().clone())
    }

    async fn save_all(&self, document: &StateDocument) -> Result<()> {
        *self.document.write() = document.clone();
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_shop_core::UserState;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryStore::new();
        assert!(store.load_all().await.unwrap().users.is_empty());

        let mut doc = StateDocument::default();
        doc.users.insert("u1".to_string(), UserState::default());
        store.save_all(&doc).await.unwrap();

        assert_eq!(store.load_all().await.unwrap(), doc);
        assert_eq!(store.save_count(), 1);
        assert!(store.snapshot().users.contains_key("u1"));
    }
}
