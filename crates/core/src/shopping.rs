//! Shopping list and per-user state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category assigned to items the catalog does not know
pub const UNCATEGORIZED: &str = "uncategorized";

/// One entry on a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default)]
    pub organic: bool,
    /// Unit price copied from the catalog when the item was added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    pub fn identity(&self) -> ItemIdentity<'_> {
        ItemIdentity {
            name: &self.name,
            brand: self.brand.as_deref(),
            variant: self.variant.as_deref(),
            organic: self.organic,
        }
    }
}

/// Fields that decide whether two adds refer to the same line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemIdentity<'a> {
    pub name: &'a str,
    pub brand: Option<&'a str>,
    pub variant: Option<&'a str>,
    pub organic: bool,
}

/// Everything remembered about one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    #[serde(default)]
    pub shopping_list: Vec<LineItem>,
    /// Append-only record of added items
    #[serde(default)]
    pub history: Vec<LineItem>,
    #[serde(default)]
    pub preferences: BTreeMap<String, serde_json::Value>,
}

impl UserState {
    pub fn find_mut(&mut self, identity: &ItemIdentity<'_>) -> Option<&mut LineItem> {
        self.shopping_list
            .iter_mut()
            .find(|item| item.identity() == *identity)
    }

    /// Remove the first line whose name matches exactly
    pub fn remove_first(&mut self, name: &str) -> Option<LineItem> {
        let idx = self.shopping_list.iter().position(|i| i.name == name)?;
        Some(self.shopping_list.remove(idx))
    }

    pub fn clear_list(&mut self) {
        self.shopping_list.clear();
    }

    /// Categories present on the list, in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.shopping_list {
            if !seen.contains(&item.category.as_str()) {
                seen.push(item.category.as_str());
            }
        }
        seen
    }

    /// Names of the last `n` history entries, oldest first
    pub fn recent_history(&self, n: usize) -> impl Iterator<Item = &str> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].iter().map(|i| i.name.as_str())
    }
}
