//! State storage trait

use crate::{Result, StateDocument};
use async_trait::async_trait;

/// Whole-document state persistence
///
/// The document is loaded once at start and rewritten in full after every
/// mutation. `save_all` must either replace the stored document completely or
/// leave the previous one intact.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the stored document, or an empty one when nothing has been saved
    async fn load_all(&self) -> Result<StateDocument>;

    async fn save_all(&self, document: &StateDocument) -> Result<()>;
}
