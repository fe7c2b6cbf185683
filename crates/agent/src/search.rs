//! Catalog search

use voice_shop_core::{Catalog, ParsedCommand, PriceFilter, ProductMatch};

/// Filters applied to every catalog product
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Substring of the product name
    pub text: String,
    pub brand: Option<String>,
    pub variant: Option<String>,
    /// Only products whose name contains "organic"
    pub organic: bool,
    /// Applied to products that carry a price
    pub price: Option<PriceFilter>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn from_command(text: &str, command: &ParsedCommand) -> Self {
        Self {
            text: text.to_string(),
            brand: command.brand.clone(),
            variant: command.variant.clone(),
            organic: command.organic,
            price: command.price,
        }
    }
}

/// All catalog products passing `query`, in catalog order
pub fn search_catalog<'a>(catalog: &'a Catalog, query: &SearchQuery) -> Vec<ProductMatch<'a>> {
    catalog
        .iter_products()
        .filter(|m| {
            let product = m.product;

            if !product.name.contains(query.text.as_str()) {
                return false;
            }
            if let Some(brand) = &query.brand {
                if !product.has_brand(brand) {
                    return false;
                }
            }
            if let Some(variant) = &query.variant {
                if !product.has_type(variant) {
                    return false;
                }
            }
            if query.organic && !product.name.contains("organic") {
                return false;
            }
            match (query.price, product.price) {
                (Some(filter), Some(price)) => filter.accepts(price),
                _ => true,
            }
        })
        .collect()
}
