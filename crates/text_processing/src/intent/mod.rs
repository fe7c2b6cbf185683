//! Intent Classification
//!
//! Maps an utterance to one of the fixed shopping intents by keyword presence.
//!
//! # Features
//!
//! - Ordered (intent, aliases) tables, first match wins
//! - Spanish, French, German and romanized Hindi groups, checked before English
//! - Plain substring containment, no tokenization
//! - Greeting and thanks detection for utterances with no intent
//!
//! Substring matching means "addition" classifies as add. This is accepted.
//!
//! # Example
//!
//! ```
//! use voice_shop_core::Intent;
//! use voice_shop_text_processing::IntentClassifier;
//!
//! let classifier = IntentClassifier::new();
//! assert_eq!(classifier.classify("añade leche"), Intent::Add);
//! assert_eq!(classifier.classify("what's on my list"), Intent::Show);
//! ```

use std::str::FromStr;
use voice_shop_core::Intent;

use crate::{Result, TextProcessingError};

type AliasTable = &'static [(Intent, &'static [&'static str])];

const ENGLISH: AliasTable = &[
    (Intent::Add, &["add", "need", "want", "buy", "get", "put"]),
    (Intent::Remove, &["remove", "delete", "drop", "take off"]),
    (
        Intent::Show,
        &["show", "what's on", "what is on", "what's in", "view", "display"],
    ),
    (Intent::Find, &["find", "search", "look for", "look up"]),
    (Intent::Suggest, &["suggest", "recommend", "ideas", "what else"]),
    (Intent::Clear, &["clear", "empty", "start over", "reset"]),
];

const SPANISH: AliasTable = &[
    (Intent::Add, &["añade", "agrega", "añadir", "agregar"]),
    (Intent::Remove, &["quita", "elimina", "borra"]),
    (Intent::Show, &["muestra", "qué hay en"]),
    (Intent::Find, &["busca", "encuentra"]),
    (Intent::Suggest, &["sugiere", "recomienda"]),
    (Intent::Clear, &["vacía", "limpia"]),
];

const FRENCH: AliasTable = &[
    (Intent::Add, &["ajoute", "ajouter"]),
    (Intent::Remove, &["enlève", "supprime", "retire"]),
    (Intent::Show, &["montre", "affiche"]),
    (Intent::Find, &["cherche", "trouve"]),
    (Intent::Suggest, &["suggère", "recommande"]),
    (Intent::Clear, &["vide la", "vider"]),
];

const GERMAN: AliasTable = &[
    (Intent::Add, &["hinzufügen", "füge"]),
    (Intent::Remove, &["entferne", "lösche"]),
    (Intent::Show, &["zeige"]),
    (Intent::Find, &["suche", "finde"]),
    (Intent::Suggest, &["empfiehl", "vorschlag"]),
    (Intent::Clear, &["leere"]),
];

const HINDI: AliasTable = &[
    (Intent::Add, &["jodo", "daalo"]),
    (Intent::Remove, &["hatao", "nikalo"]),
    (Intent::Show, &["dikhao"]),
    (Intent::Find, &["dhundo", "khojo"]),
    (Intent::Suggest, &["sujhao"]),
    (Intent::Clear, &["saaf karo"]),
];

/// Non-English alias group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Spanish,
    French,
    German,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Hindi,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Hindi => "hi",
        }
    }

    fn aliases(&self) -> AliasTable {
        match self {
            Language::Spanish => SPANISH,
            Language::French => FRENCH,
            Language::German => GERMAN,
            Language::Hindi => HINDI,
        }
    }
}

impl FromStr for Language {
    type Err = TextProcessingError;

    fn from_str(code: &str) -> Result<Self> {
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| TextProcessingError::UnsupportedLanguage(code.to_string()))
    }
}

/// Whether `word` is itself an alias in any language group
pub(crate) fn is_command_word(word: &str) -> bool {
    std::iter::once(ENGLISH)
        .chain(Language::ALL.iter().map(|l| l.aliases()))
        .flat_map(|table| table.iter())
        .any(|(_, aliases)| aliases.contains(&word))
}

fn first_match(table: AliasTable, text: &str) -> Option<Intent> {
    table
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| text.contains(alias)))
        .map(|(intent, _)| *intent)
}

/// Keyword intent classifier
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    languages: Vec<Language>,
}

impl IntentClassifier {
    /// Classifier with every language group enabled
    pub fn new() -> Self {
        Self::with_languages(Language::ALL.to_vec())
    }

    /// Classifier checking `languages` in the given order before English
    pub fn with_languages(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    /// Build from configured language codes (e.g. `["es", "hi"]`)
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        let languages = codes
            .iter()
            .map(|c| c.as_ref().parse())
            .collect::<Result<Vec<Language>>>()?;
        Ok(Self::with_languages(languages))
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Classify an utterance
    pub fn classify(&self, text: &str) -> Intent {
        let text = text.to_lowercase();

        for language in &self.languages {
            if let Some(intent) = first_match(language.aliases(), &text) {
                tracing::trace!(language = language.code(), ?intent, "Matched language alias");
                return intent;
            }
        }

        first_match(ENGLISH, &text).unwrap_or(Intent::Unknown)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "hola", "bonjour", "hallo", "namaste"];
const GREETING_PHRASES: &[&str] = &["good morning", "good afternoon", "good evening"];
const THANKS: &[&str] = &["thank", "gracias", "merci", "danke", "dhanyavaad", "shukriya"];

/// Conversational input that carries no shopping intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallTalk {
    Greeting,
    Thanks,
}

impl SmallTalk {
    /// Greeting is checked before thanks
    pub fn detect(text: &str) -> Option<Self> {
        let text = text.to_lowercase();

        // Short greetings compare whole words so "hi" does not fire inside "chips"
        let greeted = text
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| GREETING_WORDS.contains(&word))
            || GREETING_PHRASES.iter().any(|p| text.contains(p));
        if greeted {
            return Some(SmallTalk::Greeting);
        }

        if THANKS.iter().any(|t| text.contains(t)) {
            return Some(SmallTalk::Thanks);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_intents() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("add two milk"), Intent::Add);
        assert_eq!(classifier.classify("I need eggs"), Intent::Add);
        assert_eq!(classifier.classify("remove milk"), Intent::Remove);
        assert_eq!(classifier.classify("what's on my list"), Intent::Show);
        assert_eq!(classifier.classify("show me my list"), Intent::Show);
        assert_eq!(classifier.classify("find cheese under $5"), Intent::Find);
        assert_eq!(classifier.classify("suggest something"), Intent::Suggest);
        assert_eq!(classifier.classify("clear my list"), Intent::Clear);
        assert_eq!(classifier.classify("hello there"), Intent::Unknown);
    }

    #[test]
    fn test_english_priority_order() {
        let classifier = IntentClassifier::new();
        // add is checked before remove
        assert_eq!(classifier.classify("add milk and remove eggs"), Intent::Add);
        // substring containment, word boundaries are not respected
        assert_eq!(classifier.classify("addition"), Intent::Add);
    }

    #[test]
    fn test_language_groups_checked_first() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("añade leche"), Intent::Add);
        assert_eq!(classifier.classify("quita el pan"), Intent::Remove);
        assert_eq!(classifier.classify("ajoute du fromage"), Intent::Add);
        assert_eq!(classifier.classify("lösche milch"), Intent::Remove);
        assert_eq!(classifier.classify("doodh jodo"), Intent::Add);
        assert_eq!(classifier.classify("list saaf karo"), Intent::Clear);
        // "busca" wins over the English "add" that follows it
        assert_eq!(classifier.classify("busca queso and add"), Intent::Find);
    }

    #[test]
    fn test_disabled_language_falls_back_to_english() {
        let classifier = IntentClassifier::from_codes(&["fr"]).unwrap();
        assert_eq!(classifier.languages(), &[Language::French]);
        assert_eq!(classifier.classify("añade leche"), Intent::Unknown);
        assert_eq!(classifier.classify("add leche"), Intent::Add);
    }

    #[test]
    fn test_unknown_language_code() {
        assert!(IntentClassifier::from_codes(&["es", "xx"]).is_err());
        assert_eq!("DE".parse::<Language>().unwrap(), Language::German);
    }

    #[test]
    fn test_small_talk() {
        assert_eq!(SmallTalk::detect("Hello!"), Some(SmallTalk::Greeting));
        assert_eq!(SmallTalk::detect("good morning"), Some(SmallTalk::Greeting));
        assert_eq!(SmallTalk::detect("thanks a lot"), Some(SmallTalk::Thanks));
        assert_eq!(SmallTalk::detect("merci"), Some(SmallTalk::Thanks));
        assert_eq!(SmallTalk::detect("chips"), None);
        assert_eq!(SmallTalk::detect("blah"), None);
    }
}
