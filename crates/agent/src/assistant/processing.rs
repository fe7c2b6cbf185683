//! Command dispatch and list operations

use voice_shop_core::{Intent, ItemIdentity, LineItem, ParsedCommand, UserState, UNCATEGORIZED};
use voice_shop_text_processing::SmallTalk;

use super::response;
use super::{Outcome, ShoppingAssistant};
use crate::search::{search_catalog, SearchQuery};

impl ShoppingAssistant {
    pub(crate) fn dispatch(
        &self,
        raw: &str,
        command: &ParsedCommand,
        state: &mut UserState,
    ) -> Outcome {
        let item = command.item.as_deref();

        match (command.intent, item) {
            (Intent::Add, Some(item)) => self.add_item(item, command, state),
            (Intent::Add, None) => Outcome::reply(response::ASK_ADD),
            (Intent::Remove, Some(item)) => remove_item(item, state),
            (Intent::Remove, None) => Outcome::reply(response::ASK_REMOVE),
            (Intent::Show, _) => Outcome::reply(response::shopping_list(&state.shopping_list)),
            (Intent::Find, Some(item)) => self.find_items(item, command),
            (Intent::Find, None) => Outcome::reply(response::ASK_FIND),
            (Intent::Suggest, _) => self.suggest_from_history(state),
            (Intent::Clear, _) => {
                state.clear_list();
                Outcome::mutated(response::LIST_CLEARED)
            }
            (Intent::Unknown, _) => Outcome::reply(match SmallTalk::detect(raw) {
                Some(SmallTalk::Greeting) => response::GREETING,
                Some(SmallTalk::Thanks) => response::THANKS,
                None => response::HELP,
            }),
        }
    }

    fn add_item(&self, item: &str, command: &ParsedCommand, state: &mut UserState) -> Outcome {
        let now = self.clock.now();
        let identity = ItemIdentity {
            name: item,
            brand: command.brand.as_deref(),
            variant: command.variant.as_deref(),
            organic: command.organic,
        };

        if let Some(existing) = state.find_mut(&identity) {
            existing.quantity = existing.quantity.saturating_add(command.quantity);
            let total = existing.quantity;
            tracing::debug!(item, quantity = total, "Merged into existing line");
            return Outcome::mutated(response::updated(item, total));
        }

        let product = self.catalog.find_product(item);
        let line = LineItem {
            name: item.to_string(),
            quantity: command.quantity,
            category: product
                .map(|m| m.category.to_string())
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            brand: command.brand.clone(),
            variant: command.variant.clone(),
            organic: command.organic,
            price: product.and_then(|m| m.product.price),
            added_at: now,
        };
        tracing::debug!(item, category = %line.category, quantity = line.quantity, "Adding line");
        state.shopping_list.push(line.clone());
        state.history.push(line);

        let today = now.date_naive();
        let mut reply = response::added(command.quantity, item);

        if let Some(sale) = self.catalog.active_sale(item, today) {
            reply.push_str(&response::sale_note(sale));
        }

        let suggestions = self.suggestions.suggest(&[item], state, &self.catalog, today);
        let shown = self.suggestions.config().shown_in_response;
        if !suggestions.is_empty() && shown > 0 {
            let end = suggestions.len().min(shown);
            reply.push_str(&response::also_need(&suggestions[..end]));
        }

        Outcome::mutated(reply)
    }

    fn find_items(&self, item: &str, command: &ParsedCommand) -> Outcome {
        let query = SearchQuery::from_command(item, command);
        let results = search_catalog(&self.catalog, &query);
        tracing::debug!(query = item, results = results.len(), "Searched catalog");
        Outcome::reply(response::search_results(item, &results))
    }

    fn suggest_from_history(&self, state: &UserState) -> Outcome {
        if state.history.is_empty() {
            return Outcome::reply(response::NO_HISTORY);
        }

        let config = self.suggestions.config();
        let triggers: Vec<&str> = state.recent_history(config.suggest_triggers).collect();
        let suggestions =
            self.suggestions
                .suggest(&triggers, state, &self.catalog, self.clock.today());

        if suggestions.is_empty() {
            Outcome::reply(response::NO_SUGGESTIONS)
        } else {
            Outcome::reply(response::recommendations(&suggestions))
        }
    }
}

fn remove_item(item: &str, state: &mut UserState) -> Outcome {
    match state.remove_first(item) {
        Some(_) => Outcome::mutated(response::removed(item)),
        None => Outcome::reply(response::not_on_list(item)),
    }
}
