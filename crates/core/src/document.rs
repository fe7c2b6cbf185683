//! Persisted state document
//!
//! The whole system state is a single document: every user's state plus the
//! catalog it was built against. Stores read and write it as one unit.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Catalog, Product, Sale, Season};
use crate::shopping::UserState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    #[serde(default)]
    pub users: BTreeMap<String, UserState>,
    #[serde(default)]
    pub products: IndexMap<String, Vec<Product>>,
    #[serde(default)]
    pub substitutes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub seasonal_items: BTreeMap<Season, Vec<String>>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

impl StateDocument {
    pub fn new(catalog: &Catalog) -> Self {
        let mut doc = Self::default();
        doc.set_catalog(catalog);
        doc
    }

    /// A document without products is treated as never written
    pub fn has_catalog(&self) -> bool {
        !self.products.is_empty()
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            products: self.products.clone(),
            substitutes: self.substitutes.clone(),
            seasonal_items: self.seasonal_items.clone(),
            sales: self.sales.clone(),
        }
    }

    pub fn set_catalog(&mut self, catalog: &Catalog) {
        self.products = catalog.products.clone();
        self.substitutes = catalog.substitutes.clone();
        self.seasonal_items = catalog.seasonal_items.clone();
        self.sales = catalog.sales.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_json_shape() {
        let mut catalog = Catalog::default();
        catalog
            .products
            .insert("dairy".to_string(), vec![Product::new("milk").with_price(3.99)]);
        catalog
            .seasonal_items
            .insert(Season::Winter, vec!["soup".to_string()]);

        let mut doc = StateDocument::new(&catalog);
        doc.users.insert("u1".to_string(), UserState::default());

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["users"]["u1"]["shopping_list"].is_array());
        assert_eq!(value["products"]["dairy"][0]["name"], "milk");
        assert_eq!(value["seasonal_items"]["winter"][0], "soup");

        let back: StateDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.catalog(), catalog);
    }

    #[test]
    fn test_empty_document_has_no_catalog() {
        let doc: StateDocument = serde_json::from_str("{}").unwrap();
        assert!(!doc.has_catalog());
        assert!(doc.users.is_empty());
    }
}
