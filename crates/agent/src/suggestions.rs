//! Suggestion engine
//!
//! Candidates are gathered in a fixed order:
//! 1. substitutes for every trigger
//! 2. a random sample from each category already on the list
//! 3. the current season's items
//! 4. recent history
//! 5. items on sale, tagged "(on sale!)"
//!
//! The list is then deduplicated in first-seen order, stripped of the triggers
//! and capped.

use chrono::NaiveDate;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use voice_shop_config::SuggestionConfig;
use voice_shop_core::{Catalog, Season, UserState};

const ON_SALE_TAG: &str = " (on sale!)";

pub struct SuggestionEngine {
    config: SuggestionConfig,
    rng: Mutex<StdRng>,
}

impl SuggestionEngine {
    pub fn new(config: SuggestionConfig) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic category sampling
    pub fn with_seed(config: SuggestionConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Suggestions for the items in `triggers`
    pub fn suggest(
        &self,
        triggers: &[&str],
        state: &UserState,
        catalog: &Catalog,
        today: NaiveDate,
    ) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();

        for trigger in triggers {
            candidates.extend(catalog.substitutes_for(trigger).map(str::to_string));
        }

        {
            let mut rng = self.rng.lock();
            for category in state.categories() {
                let products = catalog.category_products(category);
                candidates.extend(
                    products
                        .choose_multiple(&mut *rng, self.config.category_samples)
                        .map(|p| p.name.clone()),
                );
            }
        }

        candidates.extend(catalog.seasonal(Season::for_date(today)).iter().cloned());

        candidates.extend(
            state
                .recent_history(self.config.history_window)
                .map(str::to_string),
        );

        candidates.extend(
            catalog
                .active_sales(today)
                .map(|sale| format!("{}{}", sale.item, ON_SALE_TAG)),
        );

        let excluded: HashSet<String> = triggers
            .iter()
            .flat_map(|t| [t.to_string(), format!("{}{}", t, ON_SALE_TAG)])
            .collect();

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|c| !excluded.contains(c))
            .filter(|c| seen.insert(c.clone()))
            .take(self.config.max_suggestions)
            .collect()
    }
}
