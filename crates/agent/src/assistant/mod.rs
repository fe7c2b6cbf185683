//! Shopping assistant
//!
//! Owns the per-user state and the persisted document mirror. Every command
//! for a user runs under that user's async mutex; the whole-document save runs
//! under a single writer lock taken after it.

mod processing;
pub mod response;

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use voice_shop_config::{NluConfig, SuggestionConfig};
use voice_shop_core::{
    Catalog, LineItem, Narrator, SpeechToText, StateDocument, StateStore, UserState,
};
use voice_shop_text_processing::{CommandParser, IntentClassifier};

use crate::clock::{Clock, SystemClock};
use crate::suggestions::SuggestionEngine;
use crate::AgentError;

/// Assistant configuration
#[derive(Debug, Clone, Default)]
pub struct AssistantConfig {
    pub nlu: NluConfig,
    pub suggestions: SuggestionConfig,
}

/// Result of running one operation against a user's state
#[derive(Debug)]
pub(crate) struct Outcome {
    pub response: String,
    /// The state changed and must be persisted
    pub mutated: bool,
}

impl Outcome {
    pub fn reply(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            mutated: false,
        }
    }

    pub fn mutated(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            mutated: true,
        }
    }
}

pub struct ShoppingAssistant {
    catalog: Arc<Catalog>,
    parser: CommandParser,
    users: DashMap<String, Arc<Mutex<UserState>>>,
    /// Last successfully saved document
    document: Mutex<StateDocument>,
    store: Arc<dyn StateStore>,
    narrator: Option<Arc<dyn Narrator>>,
    suggestions: SuggestionEngine,
    clock: Arc<dyn Clock>,
}

impl ShoppingAssistant {
    /// Load the persisted document and prepare the assistant
    ///
    /// A document without a catalog is seeded with `seed` and saved back.
    pub async fn open(
        store: Arc<dyn StateStore>,
        seed: Catalog,
        config: AssistantConfig,
    ) -> Result<Self, AgentError> {
        let mut document = store.load_all().await?;

        if !document.has_catalog() {
            tracing::info!(
                products = seed.product_count(),
                "Seeding catalog into state store"
            );
            document.set_catalog(&seed);
            store.save_all(&document).await?;
        }

        let catalog = document.catalog();
        catalog.validate()?;

        let classifier = IntentClassifier::from_codes(config.nlu.languages.as_slice())?;

        let users = DashMap::new();
        for (user_id, state) in &document.users {
            users.insert(user_id.clone(), Arc::new(Mutex::new(state.clone())));
        }

        tracing::info!(
            users = users.len(),
            products = catalog.product_count(),
            languages = ?config.nlu.languages,
            "Shopping assistant ready"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            parser: CommandParser::with_classifier(classifier),
            users,
            document: Mutex::new(document),
            store,
            narrator: None,
            suggestions: SuggestionEngine::new(config.suggestions),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Seed the suggestion sampler
    pub fn with_suggestion_seed(mut self, seed: u64) -> Self {
        let config = self.suggestions.config().clone();
        self.suggestions = SuggestionEngine::with_seed(config, seed);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Understand `raw` and apply it to `user_id`'s list
    ///
    /// Never fails: lookup misses, missing slots and storage errors all come
    /// back as replies.
    pub async fn process_command(&self, raw: &str, user_id: &str) -> String {
        let start = Instant::now();
        let command = self.parser.parse(raw, &self.catalog);
        let intent = command.intent;

        tracing::debug!(user_id = %user_id, ?intent, "Processing command");

        let response = self
            .run_locked(user_id, |assistant, state| {
                assistant.dispatch(raw, &command, state)
            })
            .await;

        metrics::counter!("voice_shop_commands_total", "intent" => intent.as_str()).increment(1);
        metrics::histogram!("voice_shop_command_latency_seconds")
            .record(start.elapsed().as_secs_f64());

        self.narrate(&response);
        response
    }

    /// Transcribe `audio` and process the transcript
    pub async fn process_audio(
        &self,
        stt: &dyn SpeechToText,
        audio: &[u8],
        user_id: &str,
    ) -> String {
        match stt.transcribe(audio).await {
            Ok(text) => {
                tracing::info!(user_id = %user_id, text = %text, "Recognized speech");
                self.process_command(&text, user_id).await
            }
            Err(failure) => {
                tracing::warn!(user_id = %user_id, ?failure, backend = stt.name(), "Speech recognition failed");
                metrics::counter!("voice_shop_errors_total", "kind" => "recognition").increment(1);
                let reply = response::NOT_UNDERSTOOD.to_string();
                self.narrate(&reply);
                reply
            }
        }
    }

    /// Empty `user_id`'s list, keeping history
    pub async fn clear_list(&self, user_id: &str) -> String {
        self.run_locked(user_id, |_, state| {
            state.clear_list();
            Outcome::mutated(response::LIST_CLEARED_SHORT)
        })
        .await
    }

    /// Copy of `user_id`'s list; unknown users have an empty list
    pub async fn shopping_list(&self, user_id: &str) -> Vec<LineItem> {
        let handle = match self.users.get(user_id) {
            Some(entry) => entry.value().clone(),
            None => return Vec::new(),
        };
        let state = handle.lock().await;
        state.shopping_list.clone()
    }

    fn user_handle(&self, user_id: &str) -> Arc<Mutex<UserState>> {
        self.users
            .entry(user_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(user_id = %user_id, "Creating user state");
                Arc::new(Mutex::new(UserState::default()))
            })
            .value()
            .clone()
    }

    /// Run `op` under the user's lock, persisting on mutation
    ///
    /// When the save fails the user's state is restored to what it was before
    /// `op` ran, so memory never runs ahead of storage.
    async fn run_locked<F>(&self, user_id: &str, op: F) -> String
    where
        F: FnOnce(&Self, &mut UserState) -> Outcome,
    {
        let handle = self.user_handle(user_id);
        let mut state = handle.lock().await;
        let before = state.clone();

        let outcome = op(self, &mut *state);
        if !outcome.mutated {
            return outcome.response;
        }

        match self.persist(user_id, &*state).await {
            Ok(()) => outcome.response,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to save shopping list");
                metrics::counter!("voice_shop_errors_total", "kind" => e.kind()).increment(1);
                *state = before;
                response::SAVE_FAILED.to_string()
            }
        }
    }

    async fn persist(&self, user_id: &str, state: &UserState) -> voice_shop_core::Result<()> {
        let mut document = self.document.lock().await;
        let previous = document.users.insert(user_id.to_string(), state.clone());

        if let Err(e) = self.store.save_all(&document).await {
            match previous {
                Some(previous) => {
                    document.users.insert(user_id.to_string(), previous);
                }
                None => {
                    document.users.remove(user_id);
                }
            }
            return Err(e);
        }

        Ok(())
    }

    /// Speak `text` in the background
    fn narrate(&self, text: &str) {
        let Some(narrator) = self.narrator.clone() else {
            return;
        };
        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(e) = narrator.speak(&text).await {
                tracing::warn!(narrator = narrator.name(), error = %e, "Narration failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_shop_config::default_catalog;
    use voice_shop_persistence::InMemoryStore;

    async fn assistant() -> (ShoppingAssistant, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let assistant =
            ShoppingAssistant::open(store.clone(), default_catalog(), AssistantConfig::default())
                .await
                .unwrap();
        (assistant, store)
    }

    #[tokio::test]
    async fn test_open_seeds_catalog() {
        let (assistant, store) = assistant().await;
        assert_eq!(store.save_count(), 1);
        assert!(store.snapshot().has_catalog());
        assert_eq!(assistant.catalog(), &default_catalog());
        assert_eq!(assistant.user_count(), 0);
    }

    #[tokio::test]
    async fn test_open_keeps_existing_users() {
        let mut document = StateDocument::new(&default_catalog());
        document
            .users
            .insert("alice".to_string(), UserState::default());
        let store = Arc::new(InMemoryStore::with_document(document));

        let assistant =
            ShoppingAssistant::open(store.clone(), Catalog::default(), AssistantConfig::default())
                .await
                .unwrap();
        assert_eq!(assistant.user_count(), 1);
        assert_eq!(store.save_count(), 0);
        assert!(assistant.catalog().find_product("milk").is_some());
    }

    #[tokio::test]
    async fn test_unknown_language_rejected() {
        let config = AssistantConfig {
            nlu: NluConfig {
                languages: vec!["xx".to_string()],
            },
            ..Default::default()
        };
        let result = ShoppingAssistant::open(
            Arc::new(InMemoryStore::new()),
            default_catalog(),
            config,
        )
        .await;
        assert!(matches!(result, Err(AgentError::Language(_))));
    }

    #[tokio::test]
    async fn test_read_only_commands_do_not_save() {
        let (assistant, store) = assistant().await;
        assistant.process_command("what's on my list", "u1").await;
        assistant.process_command("find cheese", "u1").await;
        assert_eq!(store.save_count(), 1);

        assistant.process_command("add eggs", "u1").await;
        assert_eq!(store.save_count(), 2);
        assert_eq!(store.snapshot().users["u1"].shopping_list.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_list_keeps_history() {
        let (assistant, store) = assistant().await;
        assistant.process_command("add milk", "u1").await;
        assistant.process_command("add bread", "u1").await;

        assert_eq!(assistant.clear_list("u1").await, "Shopping list cleared.");
        assert!(assistant.shopping_list("u1").await.is_empty());
        assert_eq!(store.snapshot().users["u1"].history.len(), 2);
    }

    #[tokio::test]
    async fn test_shopping_list_for_unknown_user() {
        let (assistant, _) = assistant().await;
        assert!(assistant.shopping_list("nobody").await.is_empty());
        assert_eq!(assistant.user_count(), 0);
    }
}
