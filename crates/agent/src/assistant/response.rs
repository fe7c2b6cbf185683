//! Reply wording

use voice_shop_core::{LineItem, ProductMatch, Sale};

pub const GREETING: &str =
    "Hello! I can help you manage your shopping list. Try saying 'add milk' or 'what's on my list'.";
pub const THANKS: &str = "You're welcome! Anything else for your list?";
pub const HELP: &str =
    "I'm not sure what you want to do. Try saying 'add milk', 'remove eggs', or 'find cheese under $5'.";
pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't catch that. Please try again.";
pub const SAVE_FAILED: &str = "Sorry, I couldn't save your shopping list. Please try again.";

pub const ASK_ADD: &str = "What would you like to add to your shopping list?";
pub const ASK_REMOVE: &str = "What would you like to remove from your shopping list?";
pub const ASK_FIND: &str = "What would you like me to search for?";

pub const EMPTY_LIST: &str = "Your shopping list is empty.";
pub const LIST_CLEARED: &str = "Your shopping list has been cleared.";
pub const LIST_CLEARED_SHORT: &str = "Shopping list cleared.";

pub const NO_HISTORY: &str =
    "I don't have enough history to make suggestions yet. Try adding some items first.";
pub const NO_SUGGESTIONS: &str = "I don't have any suggestions right now.";

/// Results listed by name in a search reply
pub const SEARCH_RESULTS_SHOWN: usize = 5;

pub fn added(quantity: u32, item: &str) -> String {
    format!("Added {} {} to your shopping list.", quantity, item)
}

pub fn updated(item: &str, quantity: u32) -> String {
    format!("Updated quantity of {} to {}.", item, quantity)
}

pub fn removed(item: &str) -> String {
    format!("Removed {} from your shopping list.", item)
}

pub fn not_on_list(item: &str) -> String {
    format!("I couldn't find {} in your shopping list.", item)
}

pub fn sale_note(sale: &Sale) -> String {
    format!(
        " Good news: {} is on sale for {}% off until {}.",
        sale.item,
        sale.percent_off(),
        sale.expires.format("%Y-%m-%d")
    )
}

pub fn also_need(suggestions: &[String]) -> String {
    format!(" You might also need: {}.", suggestions.join(", "))
}

pub fn recommendations(suggestions: &[String]) -> String {
    format!(
        "Based on your recent items, you might like: {}.",
        suggestions.join(", ")
    )
}

/// Quantity and name only; brand, type and organic flag are not spoken
fn describe(item: &LineItem) -> String {
    format!("{} {}", item.quantity, item.name)
}

/// List grouped by category, categories in first-seen order
pub fn shopping_list(items: &[LineItem]) -> String {
    if items.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    for item in items {
        let entry = describe(item);
        match groups.iter_mut().find(|(c, _)| *c == item.category) {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((item.category.as_str(), vec![entry])),
        }
    }

    let sections: Vec<String> = groups
        .iter()
        .map(|(category, entries)| format!("{}: {}.", category, entries.join(", ")))
        .collect();
    format!("Here's your shopping list: {}", sections.join(" "))
}

pub fn search_results(query: &str, results: &[ProductMatch<'_>]) -> String {
    if results.is_empty() {
        return format!("I couldn't find any items matching {}.", query);
    }

    let shown: Vec<String> = results
        .iter()
        .take(SEARCH_RESULTS_SHOWN)
        .map(|m| match m.product.price {
            Some(price) => format!("{} (${:.2})", m.product.name, price),
            None => m.product.name.clone(),
        })
        .collect();

    let noun = if results.len() == 1 { "item" } else { "items" };
    let mut reply = format!("I found {} {}: {}", results.len(), noun, shown.join(", "));
    if results.len() > SEARCH_RESULTS_SHOWN {
        reply.push_str(&format!(" and {} more.", results.len() - SEARCH_RESULTS_SHOWN));
    } else {
        reply.push('.');
    }
    reply
}
