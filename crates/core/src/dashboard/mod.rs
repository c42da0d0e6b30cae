//! Dashboard statistics over the last 90 days of orders.

mod ports;
mod service;
mod summary;

pub use ports::RatesProvider;
pub use service::{DashboardService, DashboardStats};
pub use summary::{creator_counts, status_counts, totals_by_currency};
