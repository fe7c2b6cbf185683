//! JSON file state store
//!
//! The whole document lives in one pretty-printed JSON file. Saves write to a
//! temporary file in the same directory, flush it, then rename it over the
//! target, so readers only ever see a complete document.

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use voice_shop_core::{Result, StateDocument, StateStore};

use crate::PersistenceError;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> std::result::Result<StateDocument, PersistenceError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No state file yet, starting empty");
                return Ok(StateDocument::default());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(StateDocument::default());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_atomic(path: &Path, bytes: &[u8]) -> std::result::Result<(), PersistenceError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;

        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load_all(&self) -> Result<StateDocument> {
        let path = self.path.clone();
        let document = tokio::task::spawn_blocking(move || Self::read(&path))
            .await
            .map_err(PersistenceError::from)??;

        tracing::debug!(
            path = %self.path.display(),
            users = document.users.len(),
            "Loaded state document"
        );
        Ok(document)
    }

    async fn save_all(&self, document: &StateDocument) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document).map_err(PersistenceError::from)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || Self::write_atomic(&path, &bytes))
            .await
            .map_err(PersistenceError::from)??;

        tracing::trace!(path = %self.path.display(), "Saved state document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use voice_shop_core::{LineItem, Product, UserState};

    fn sample_document() -> StateDocument {
        let mut doc = StateDocument::default();
        doc.products
            .insert("dairy".to_string(), vec![Product::new("milk").with_price(3.99)]);

        let item = LineItem {
            name: "milk".to_string(),
            quantity: 2,
            category: "dairy".to_string(),
            brand: None,
            variant: Some("skim".to_string()),
            organic: false,
            price: Some(3.99),
            added_at: Utc::now(),
        };
        let mut user = UserState::default();
        user.shopping_list.push(item.clone());
        user.history.push(item);
        doc.users.insert("user-1".to_string(), user);
        doc
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let doc = store.load_all().await.unwrap();
        assert!(doc.users.is_empty());
        assert!(!doc.has_catalog());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = JsonFileStore::new(&path);

        let doc = sample_document();
        store.save_all(&doc).await.unwrap();
        assert!(path.exists());

        let loaded = JsonFileStore::new(&path).load_all().await.unwrap();
        assert_eq!(loaded, doc);

        // only the target file remains, no stray temp files
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        store.save_all(&sample_document()).await.unwrap();
        store.save_all(&StateDocument::default()).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert!(loaded.users.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = JsonFileStore::new(&path).load_all().await.unwrap_err();
        assert_eq!(err.kind(), "persistence");
    }
}
