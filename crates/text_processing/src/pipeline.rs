//! Utterance to command parsing

use voice_shop_core::{Catalog, ParsedCommand};

use crate::intent::IntentClassifier;
use crate::slot_extraction::SlotExtractor;

/// Runs the classifier and the slot extractor over the same normalized text
#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    classifier: IntentClassifier,
    extractor: SlotExtractor,
}

impl CommandParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier(classifier: IntentClassifier) -> Self {
        Self {
            classifier,
            extractor: SlotExtractor::new(),
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn parse(&self, text: &str, catalog: &Catalog) -> ParsedCommand {
        let normalized = text.trim().to_lowercase();
        let intent = self.classifier.classify(&normalized);
        let slots = self.extractor.extract(&normalized, catalog);

        tracing::debug!(
            ?intent,
            item = ?slots.item,
            quantity = slots.quantity,
            brand = ?slots.brand,
            variant = ?slots.variant,
            organic = slots.organic,
            "Parsed command"
        );

        ParsedCommand {
            intent,
            item: slots.item,
            quantity: slots.quantity,
            price: slots.price,
            brand: slots.brand,
            variant: slots.variant,
            organic: slots.organic,
        }
    }
}
