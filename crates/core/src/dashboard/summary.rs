//! Pure aggregations over a fetched order window.

use std::collections::HashMap;

use orderdesk_domain::{Currency, Order, Status};

/// Sum of `total_price` per currency; rows missing either field are skipped.
pub fn totals_by_currency(orders: &[Order]) -> HashMap<Currency, f64> {
    let mut totals = HashMap::new();
    for order in orders {
        if let (Some(total), Some(currency)) = (order.total_price, order.currency) {
            *totals.entry(currency).or_insert(0.0) += total;
        }
    }
    totals
}

/// Number of orders per status.
pub fn status_counts(orders: &[Order]) -> HashMap<Status, usize> {
    let mut counts = HashMap::new();
    for order in orders {
        *counts.entry(order.status).or_insert(0) += 1;
    }
    counts
}

/// Number of orders per creator; blank creators are skipped.
pub fn creator_counts(orders: &[Order]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for order in orders {
        if !order.created_by.is_empty() {
            *counts.entry(order.created_by.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(
        status: Status,
        total: Option<f64>,
        currency: Option<Currency>,
        created_by: &str,
    ) -> Order {
        Order {
            id: "1".into(),
            created_at: None,
            created_by: created_by.into(),
            modified_at: None,
            modified_by: String::new(),
            store: String::new(),
            price_per_unit: None,
            total_price: total,
            currency,
            order_name: String::new(),
            status,
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
    fn totals_group_by_currency_and_skip_unpriced_rows() {
        let orders = vec![
            order(Status::Nowe, Some(100.0), Some(Currency::Pln), "Jan"),
            order(Status::Nowe, Some(50.0), Some(Currency::Pln), "Jan"),
            order(Status::Nowe, Some(20.0), Some(Currency::Eur), "Anna"),
            order(Status::Nowe, None, Some(Currency::Usd), "Anna"),
            order(Status::Nowe, Some(5.0), None, "Anna"),
        ];

        let totals = totals_by_currency(&orders);
        assert_eq!(totals.len(), 2);
        assert!((totals[&Currency::Pln] - 150.0).abs() < 1e-9);
        assert!((totals[&Currency::Eur] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn counts_by_status_and_creator() {
        let orders = vec![
            order(Status::Nowe, None, None, "Jan"),
            order(Status::Nowe, None, None, "Anna"),
            order(Status::DoOplaty, None, None, "Anna"),
            order(Status::Oplacone, None, None, ""),
        ];

        let by_status = status_counts(&orders);
        assert_eq!(by_status[&Status::Nowe], 2);
        assert_eq!(by_status[&Status::DoOplaty], 1);

        let by_creator = creator_counts(&orders);
        assert_eq!(by_creator["Anna"], 2);
        assert_eq!(by_creator["Jan"], 1);
        assert!(!by_creator.contains_key(""), "blank creators are skipped");
    }
}
