//! Port interface for currency rates.

use async_trait::async_trait;
use orderdesk_domain::{Currency, Result};

/// Trait for looking up the mid exchange rate of a currency against PLN
#[async_trait]
pub trait RatesProvider: Send + Sync {
    /// Mid rate of `currency` in PLN
    async fn mid_rate(&self, currency: Currency) -> Result<f64>;
}
