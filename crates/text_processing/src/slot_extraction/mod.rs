//! Slot Value Extraction for Shopping Commands
//!
//! Rule-based extraction of the attributes a command can carry: quantity,
//! item, brand, type variant, organic flag and price range.
//!
//! Item resolution walks the catalog in category order and takes the first
//! product whose name occurs in the text. Brand and type are only looked for
//! on that product. When nothing in the catalog matches, the leftover words of
//! the utterance become a free-text item.
//!
//! ## Optimization: Static Regex Patterns
//!
//! Patterns are compiled once using `once_cell::sync::Lazy`.

use once_cell::sync::Lazy;
use regex::Regex;
use voice_shop_core::{Catalog, PriceFilter};

use crate::intent::is_command_word;

// =============================================================================
// STATIC REGEX PATTERNS
// =============================================================================

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// "under $5", "below 10", "less than $3.50"
static PRICE_MAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:under|below|less than)\s*\$?\s*(\d+(?:\.\d+)?)").unwrap()
});

/// "$2 and $4", "$2 - $4", "$2 to 4"
static PRICE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\s*(\d+(?:\.\d+)?)\s*(?:and|-|to)\s*\$?\s*(\d+(?:\.\d+)?)").unwrap()
});

/// "$5 or less", "$5 or cheaper"
static PRICE_OR_LOWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\s*(\d+(?:\.\d+)?)\s*or\s*(?:lower|less|cheaper)").unwrap()
});

const NUMBER_WORDS: &[(&str, u32)] = &[
    ("a", 1),
    ("an", 1),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
];

/// Filler words dropped from free-text items, on top of the intent aliases
const STOP_WORDS: &[&str] = &[
    "the", "some", "to", "from", "my", "me", "i", "of", "on", "in", "for", "please", "shopping",
    "list", "take", "off", "look", "up", "what's", "is",
];

fn number_word(word: &str) -> Option<u32> {
    NUMBER_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, n)| *n)
}

fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation() && c != '%' && c != '\'')
}

/// Everything extracted from one utterance
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSlots {
    pub quantity: u32,
    pub item: Option<String>,
    pub brand: Option<String>,
    pub variant: Option<String>,
    pub price: Option<PriceFilter>,
    pub organic: bool,
}

impl Default for ExtractedSlots {
    fn default() -> Self {
        Self {
            quantity: 1,
            item: None,
            brand: None,
            variant: None,
            price: None,
            organic: false,
        }
    }
}

/// Rule-based slot extractor
#[derive(Debug, Clone, Default)]
pub struct SlotExtractor;

impl SlotExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all slots from lowercase text
    pub fn extract(&self, text: &str, catalog: &Catalog) -> ExtractedSlots {
        let mut slots = ExtractedSlots {
            quantity: self.extract_quantity(text),
            price: self.extract_price_filter(text),
            organic: text.contains("organic"),
            ..Default::default()
        };

        match catalog.match_in_text(text) {
            Some(found) => {
                slots.item = Some(found.product.name.clone());
                slots.brand = found.product.brand_in(text).map(str::to_string);
                slots.variant = found.product.type_in(text).map(str::to_string);
            }
            None => slots.item = self.free_text_item(text),
        }

        slots
    }

    /// First digit run, else first number word, else 1
    ///
    /// A digit run of zero, or one too large to represent, counts as 1.
    pub fn extract_quantity(&self, text: &str) -> u32 {
        if let Some(m) = DIGITS.find(text) {
            return match m.as_str().parse::<u32>() {
                Ok(0) | Err(_) => 1,
                Ok(n) => n,
            };
        }

        text.split_whitespace()
            .map(clean_token)
            .find_map(number_word)
            .unwrap_or(1)
    }

    /// First matching price pattern wins
    pub fn extract_price_filter(&self, text: &str) -> Option<PriceFilter> {
        if let Some(max) = PRICE_MAX.captures(text).and_then(|c| capture_f64(&c, 1)) {
            return Some(PriceFilter::at_most(max));
        }

        if let Some(caps) = PRICE_RANGE.captures(text) {
            if let (Some(min), Some(max)) = (capture_f64(&caps, 1), capture_f64(&caps, 2)) {
                return Some(PriceFilter::between(min, max));
            }
        }

        if let Some(max) = PRICE_OR_LOWER.captures(text).and_then(|c| capture_f64(&c, 1)) {
            return Some(PriceFilter::at_most(max));
        }

        None
    }

    /// Leftover words once command words, fillers and numbers are removed
    pub fn free_text_item(&self, text: &str) -> Option<String> {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(clean_token)
            .filter(|w| !w.is_empty())
            .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
            .filter(|w| number_word(w).is_none())
            .filter(|w| !STOP_WORDS.contains(w))
            .filter(|w| !is_command_word(w))
            .collect();

        let item = words.join(" ");
        if item.trim().is_empty() {
            None
        } else {
            Some(item)
        }
    }
}

fn capture_f64(caps: &regex::Captures<'_>, idx: usize) -> Option<f64> {
    caps.get(idx).and_then(|m| m.as_str().parse().ok())
}
