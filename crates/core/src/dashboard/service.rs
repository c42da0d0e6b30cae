//! Dashboard service - headline statistics for the last 90 days

use std::collections::HashMap;
use std::sync::Arc;

use orderdesk_domain::{Currency, FilterSpec, Order, Result, Status};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ports::RatesProvider;
use crate::orders::OrdersSource;

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Orders created in the window.
    pub total_orders: usize,
    /// Of those, still in status `nowe`.
    pub new_orders: usize,
    /// Of those, awaiting confirmation.
    pub awaiting_confirmation: usize,
    /// Sum of order totals converted to PLN at current mid rates.
    pub total_value_pln: f64,
    /// The orders behind the numbers, for charts.
    pub orders: Vec<Order>,
}

/// Computes dashboard statistics from a 90-day order window.
pub struct DashboardService {
    source: Arc<dyn OrdersSource>,
    rates: Arc<dyn RatesProvider>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn OrdersSource>, rates: Arc<dyn RatesProvider>) -> Self {
        Self { source, rates }
    }

    /// Fetch the window and compute the stats.
    ///
    /// Each non-PLN currency present in the window is looked up once. A
    /// failed rate lookup falls back to 1.0 so a rates outage degrades
    /// the sum instead of breaking the dashboard.
    pub async fn stats(&self) -> Result<DashboardStats> {
        let page = self.source.fetch_page(&FilterSpec::last_90_days()).await?;
        let rates = self.fetch_rates(&page.orders).await;

        let total_value_pln = page
            .orders
            .iter()
            .filter_map(|order| {
                let total = order.total_price?;
                let rate = order
                    .currency
                    .and_then(|currency| rates.get(&currency).copied())
                    .unwrap_or(1.0);
                Some(total * rate)
            })
            .sum();

        Ok(DashboardStats {
            total_orders: page.orders.len(),
            new_orders: page.orders.iter().filter(|o| o.status == Status::Nowe).count(),
            awaiting_confirmation: page
                .orders
                .iter()
                .filter(|o| o.status == Status::DoPotwierdzenia)
                .count(),
            total_value_pln,
            orders: page.orders,
        })
    }

    async fn fetch_rates(&self, orders: &[Order]) -> HashMap<Currency, f64> {
        let mut rates = HashMap::new();
        for currency in orders.iter().filter_map(|o| o.currency) {
            if rates.contains_key(&currency) {
                continue;
            }
            let rate = if currency == Currency::Pln {
                1.0
            } else {
                match self.rates.mid_rate(currency).await {
                    Ok(rate) => rate,
                    Err(err) => {
                        warn!(currency = %currency, error = %err, "rate lookup failed, using 1.0");
                        1.0
                    }
                }
            };
            rates.insert(currency, rate);
        }
        rates
    }
}
