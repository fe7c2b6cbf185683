//! Product catalog
//!
//! The catalog is loaded once at start and shared read-only between all users.
//! Categories keep their declared order, and product resolution walks them in
//! that order.

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::{Error, Result};

/// A product offered in one catalog category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Lowercase product name, unique across the catalog
    pub name: String,
    /// Unit price, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Known brands, in preference order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brands: Vec<String>,
    /// Known type variants (e.g. "whole", "skim")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: None,
            brands: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_brands(mut self, brands: &[&str]) -> Self {
        self.brands = brands.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// First brand mentioned in `text` (text is expected lowercase)
    pub fn brand_in(&self, text: &str) -> Option<&str> {
        first_mentioned(&self.brands, text)
    }

    /// First type variant mentioned in `text` (text is expected lowercase)
    pub fn type_in(&self, text: &str) -> Option<&str> {
        first_mentioned(&self.types, text)
    }

    pub fn has_brand(&self, brand: &str) -> bool {
        self.brands.iter().any(|b| b.eq_ignore_ascii_case(brand))
    }

    pub fn has_type(&self, variant: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(variant))
    }
}

fn first_mentioned<'a>(candidates: &'a [String], text: &str) -> Option<&'a str> {
    candidates
        .iter()
        .find(|c| text.contains(c.to_lowercase().as_str()))
        .map(|c| c.as_str())
}

/// A product together with the category it was found in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductMatch<'a> {
    pub category: &'a str,
    pub product: &'a Product,
}

/// Calendar season, fixed by month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season for a 1-based calendar month
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

/// A discount on one item, valid through `expires` inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub item: String,
    /// Fraction off the unit price, in `[0, 1]`
    pub discount: f64,
    pub expires: NaiveDate,
}

impl Sale {
    pub fn is_active(&self, today: NaiveDate) -> bool {
        today <= self.expires
    }

    /// Discount as a whole percentage
    pub fn percent_off(&self) -> u32 {
        (self.discount * 100.0).round() as u32
    }
}

/// Static product reference data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Category name -> products, in declared order
    #[serde(default)]
    pub products: IndexMap<String, Vec<Product>>,
    /// Product name -> substitute names
    #[serde(default)]
    pub substitutes: BTreeMap<String, Vec<String>>,
    /// Season -> item names
    #[serde(default)]
    pub seasonal_items: BTreeMap<Season, Vec<String>>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

impl Catalog {
    /// Check the catalog invariants
    ///
    /// A product name may appear in only one category, category names must be
    /// non-empty and every sale discount must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (category, products) in &self.products {
            if category.trim().is_empty() {
                return Err(Error::Catalog("empty category name".to_string()));
            }
            for product in products {
                if let Some(first) = seen.insert(product.name.as_str(), category.as_str()) {
                    return Err(Error::Catalog(format!(
                        "product '{}' appears in both '{}' and '{}'",
                        product.name, first, category
                    )));
                }
            }
        }

        for sale in &self.sales {
            if !(0.0..=1.0).contains(&sale.discount) {
                return Err(Error::Catalog(format!(
                    "sale on '{}' has discount {} outside [0, 1]",
                    sale.item, sale.discount
                )));
            }
        }

        Ok(())
    }

    /// All products in category order
    pub fn iter_products(&self) -> impl Iterator<Item = ProductMatch<'_>> {
        self.products.iter().flat_map(|(category, products)| {
            products.iter().map(move |product| ProductMatch {
                category: category.as_str(),
                product,
            })
        })
    }

    /// Exact name lookup
    pub fn find_product(&self, name: &str) -> Option<ProductMatch<'_>> {
        self.iter_products().find(|m| m.product.name == name)
    }

    /// First product whose name occurs anywhere in `text`
    pub fn match_in_text(&self, text: &str) -> Option<ProductMatch<'_>> {
        self.iter_products()
            .find(|m| text.contains(m.product.name.as_str()))
    }

    pub fn category_products(&self, category: &str) -> &[Product] {
        self.products
            .get(category)
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }

    /// Substitutes for every table key contained in `item`
    pub fn substitutes_for(&self, item: &str) -> impl Iterator<Item = &str> + '_ {
        let item = item.to_string();
        self.substitutes
            .iter()
            .filter(move |(key, _)| item.contains(key.as_str()))
            .flat_map(|(_, subs)| subs.iter().map(|s| s.as_str()))
    }

    pub fn seasonal(&self, season: Season) -> &[String] {
        self.seasonal_items
            .get(&season)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    /// First sale on `item` that is still running on `today`
    pub fn active_sale(&self, item: &str, today: NaiveDate) -> Option<&Sale> {
        self.sales
            .iter()
            .find(|s| s.item == item && s.is_active(today))
    }

    pub fn active_sales(&self, today: NaiveDate) -> impl Iterator<Item = &Sale> {
        self.sales.iter().filter(move |s| s.is_active(today))
    }

    pub fn product_count(&self) -> usize {
        self.products.values().map(|p| p.len()).sum()
    }
}
