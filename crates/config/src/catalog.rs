//! Catalog seed
//!
//! The catalog is written into the state document the first time the store is
//! opened. It comes from a YAML file when `store.seed_catalog` is set and from
//! the built-in table otherwise.

use chrono::NaiveDate;
use std::path::Path;
use voice_shop_core::{Catalog, Product, Sale, Season};

use crate::ConfigError;

/// Load and validate the seed catalog
pub fn load_catalog(path: Option<&str>) -> Result<Catalog, ConfigError> {
    let catalog = match path {
        Some(path) => read_catalog_file(Path::new(path))?,
        None => default_catalog(),
    };

    catalog.validate()?;

    tracing::debug!(
        categories = catalog.products.len(),
        products = catalog.product_count(),
        sales = catalog.sales.len(),
        "Loaded seed catalog"
    );

    Ok(catalog)
}

fn read_catalog_file(path: &Path) -> Result<Catalog, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("Failed to read catalog: {}", e)))?;

    serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("Failed to parse catalog: {}", e)))
}

/// Built-in grocery catalog
pub fn default_catalog() -> Catalog {
    let mut catalog = Catalog::default();

    category(
        &mut catalog,
        "dairy",
        vec![
            Product::new("milk")
                .with_price(3.99)
                .with_brands(&["Horizon", "Organic Valley", "Great Value"])
                .with_types(&["whole", "skim", "2%"]),
            Product::new("cheese")
                .with_price(5.49)
                .with_brands(&["Kraft", "Tillamook"])
                .with_types(&["cheddar", "mozzarella", "swiss"]),
            Product::new("yogurt")
                .with_price(1.29)
                .with_brands(&["Chobani", "Yoplait"])
                .with_types(&["greek", "plain", "vanilla"]),
            Product::new("butter")
                .with_price(4.49)
                .with_brands(&["Land O Lakes", "Kerrygold"])
                .with_types(&["salted", "unsalted"]),
            Product::new("eggs")
                .with_price(3.29)
                .with_types(&["large", "brown", "free range"]),
        ],
    );

    category(
        &mut catalog,
        "produce",
        vec![
            Product::new("apples")
                .with_price(0.99)
                .with_types(&["gala", "fuji", "granny smith"]),
            Product::new("bananas").with_price(0.59),
            Product::new("oranges")
                .with_price(1.09)
                .with_types(&["navel", "valencia"]),
            Product::new("lettuce")
                .with_price(1.99)
                .with_types(&["romaine", "iceberg"]),
            Product::new("tomatoes")
                .with_price(2.49)
                .with_types(&["cherry", "roma"]),
            Product::new("carrots").with_price(1.49),
        ],
    );

    category(
        &mut catalog,
        "bakery",
        vec![
            Product::new("bread")
                .with_price(2.99)
                .with_brands(&["Wonder", "Dave's Killer Bread"])
                .with_types(&["white", "whole wheat", "sourdough"]),
            Product::new("bagels")
                .with_price(3.49)
                .with_types(&["plain", "everything", "sesame"]),
            Product::new("croissants").with_price(4.99),
            Product::new("muffins")
                .with_price(4.49)
                .with_types(&["blueberry", "chocolate chip"]),
        ],
    );

    category(
        &mut catalog,
        "meat",
        vec![
            Product::new("chicken")
                .with_price(6.99)
                .with_types(&["breast", "thigh", "whole"]),
            Product::new("beef")
                .with_price(8.99)
                .with_types(&["ground", "steak"]),
            Product::new("fish")
                .with_price(9.99)
                .with_types(&["salmon", "cod", "tilapia"]),
            Product::new("pork").with_price(5.99).with_types(&["chops", "bacon"]),
        ],
    );

    category(
        &mut catalog,
        "snacks",
        vec![
            Product::new("chips")
                .with_price(3.99)
                .with_brands(&["Lay's", "Doritos"]),
            Product::new("cookies")
                .with_price(3.49)
                .with_brands(&["Oreo", "Chips Ahoy"]),
            Product::new("crackers")
                .with_price(2.99)
                .with_brands(&["Ritz", "Triscuit"]),
            Product::new("popcorn").with_price(2.49),
        ],
    );

    category(
        &mut catalog,
        "beverages",
        vec![
            Product::new("water")
                .with_price(0.99)
                .with_types(&["sparkling", "still"]),
            Product::new("soda")
                .with_price(1.99)
                .with_brands(&["Coca-Cola", "Pepsi"]),
            Product::new("juice")
                .with_price(3.49)
                .with_brands(&["Tropicana", "Minute Maid"])
                .with_types(&["orange", "apple"]),
            Product::new("coffee")
                .with_price(7.99)
                .with_brands(&["Folgers", "Starbucks"])
                .with_types(&["ground", "whole bean"]),
            Product::new("tea")
                .with_price(3.99)
                .with_brands(&["Lipton", "Twinings"])
                .with_types(&["green", "black", "herbal"]),
        ],
    );

    category(
        &mut catalog,
        "frozen",
        vec![
            Product::new("ice cream")
                .with_price(4.99)
                .with_brands(&["Ben & Jerry's", "Haagen-Dazs"])
                .with_types(&["vanilla", "chocolate"]),
            Product::new("frozen pizza").with_price(5.99),
            Product::new("frozen vegetables").with_price(2.29),
        ],
    );

    category(
        &mut catalog,
        "household",
        vec![
            Product::new("paper towels").with_price(6.49),
            Product::new("toilet paper").with_price(7.49),
            Product::new("cleaning supplies"),
        ],
    );

    let substitutes: [(&str, &[&str]); 5] = [
        ("milk", &["almond milk", "soy milk", "oat milk", "coconut milk"]),
        ("bread", &["whole wheat bread", "rye bread", "gluten-free bread"]),
        ("butter", &["margarine", "olive oil", "coconut oil"]),
        ("eggs", &["tofu", "applesauce", "commercial egg replacer"]),
        ("sugar", &["honey", "maple syrup", "stevia"]),
    ];
    for (item, subs) in substitutes {
        catalog.substitutes.insert(item.to_string(), names(subs));
    }

    let seasonal: [(Season, &[&str]); 4] = [
        (Season::Winter, &["hot chocolate", "soup", "stuffing", "cranberries"]),
        (Season::Spring, &["asparagus", "strawberries", "spinach", "peas"]),
        (Season::Summer, &["watermelon", "corn", "berries", "grill supplies"]),
        (Season::Fall, &["pumpkin", "apples", "squash", "cinnamon"]),
    ];
    for (season, items) in seasonal {
        catalog.seasonal_items.insert(season, names(items));
    }

    if let Some(expires) = NaiveDate::from_ymd_opt(2099, 12, 31) {
        catalog.sales.push(Sale {
            item: "coffee".to_string(),
            discount: 0.15,
            expires,
        });
    }

    catalog
}

fn category(catalog: &mut Catalog, name: &str, products: Vec<Product>) {
    catalog.products.insert(name.to_string(), products);
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
