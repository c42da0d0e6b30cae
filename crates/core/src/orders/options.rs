//! Suggestion lists for the store and object pickers.

use orderdesk_domain::constants::{DEFAULT_OBJECTS, FALLBACK_STORE};
use orderdesk_domain::Order;

/// Distinct non-empty store names in first-seen order, with the fallback
/// `inny` option appended when no order uses it.
pub fn store_options(orders: &[Order]) -> Vec<String> {
    let mut stores: Vec<String> = Vec::new();
    for order in orders {
        if !order.store.is_empty() && !stores.contains(&order.store) {
            stores.push(order.store.clone());
        }
    }
    if !stores.iter().any(|s| s == FALLBACK_STORE) {
        stores.push(FALLBACK_STORE.to_string());
    }
    stores
}

/// Active project names plus the default objects, sorted alphabetically.
///
/// The defaults are always offered even when the planning sheet is empty
/// or does not list them.
pub fn object_options(projects: &[String]) -> Vec<String> {
    let mut objects: Vec<String> = projects.to_vec();
    for default in DEFAULT_OBJECTS {
        if !objects.iter().any(|o| o == default) {
            objects.push(default.to_string());
        }
    }
    objects.sort();
    objects
}

#[cfg(test)]
mod tests {
    use orderdesk_domain::Status;

    use super::*;

    fn order_with_store(store: &str) -> Order {
        Order {
            id: "1".into(),
            created_at: None,
            created_by: String::new(),
            modified_at: None,
            modified_by: String::new(),
            store: store.into(),
            price_per_unit: None,
            total_price: None,
            currency: None,
            order_name: String::new(),
            status: Status::Nowe,
            deadline: None,
            object: String::new(),
            link: String::new(),
            quantity: 1,
            address: String::new(),
            note: String::new(),
            tgid: None,
        }
    }

    #[test]
    fn store_options_dedupe_and_append_fallback() {
        let orders = vec![
            order_with_store("Castorama"),
            order_with_store(""),
            order_with_store("Leroy Merlin"),
            order_with_store("Castorama"),
        ];

        let options = store_options(&orders);
        assert_eq!(options, vec!["Castorama", "Leroy Merlin", "inny"]);
    }

    #[test]
    fn store_options_keep_existing_fallback_in_place() {
        let orders = vec![order_with_store("inny"), order_with_store("Castorama")];
        assert_eq!(store_options(&orders), vec!["inny", "Castorama"]);
    }

    #[test]
    fn object_options_merge_defaults_and_sort() {
        let projects = vec!["Osiedle Zielone".to_string(), "Serwis".to_string()];
        let options = object_options(&projects);
        assert_eq!(options, vec!["Magazyn (Biuro)", "Osiedle Zielone", "Serwis"]);
    }

    #[test]
    fn object_options_without_projects_are_the_defaults() {
        assert_eq!(object_options(&[]), vec!["Magazyn (Biuro)", "Serwis"]);
    }
}
