//! Port interfaces for order data
//!
//! The read side and the write side of order storage are separate
//! adapters: reads go straight to the sheet's tabular query endpoint,
//! writes go through the script gateway, which is the only component
//! allowed to mutate the sheet.

use async_trait::async_trait;
use orderdesk_domain::{FilterSpec, Order, OrderPayload, OrdersPage, PriceUpdate, Result, Status};

/// Trait for reading orders and related lookups
#[async_trait]
pub trait OrdersSource: Send + Sync {
    /// Fetch one page of orders plus active projects and the total count
    async fn fetch_page(&self, filter: &FilterSpec) -> Result<OrdersPage>;

    /// Fetch a single order by id
    async fn order_by_id(&self, id: &str) -> Result<Option<Order>>;

    /// Distinct creator names across all orders
    async fn unique_creators(&self) -> Result<Vec<String>>;

    /// Position label for a user, from the users sheet
    async fn position_by_sub(&self, sub: &str) -> Result<Option<String>>;

    /// Whether the user has notifications enabled
    async fn allow_notifications(&self, sub: &str) -> Result<bool>;
}

/// Trait for order mutations through the script gateway
#[async_trait]
pub trait OrdersGateway: Send + Sync {
    /// Append new orders
    async fn add_orders(&self, orders: &[OrderPayload]) -> Result<()>;

    /// Overwrite existing orders by id
    async fn update_orders(&self, orders: &[OrderPayload]) -> Result<()>;

    /// Move a set of orders to a new status
    async fn update_orders_status(&self, ids: &[String], new_status: Status, sub: &str)
    -> Result<()>;

    /// Change the unit price (and derived total) of one order
    async fn update_order_price(&self, update: &PriceUpdate) -> Result<()>;

    /// Toggle the user's notification preference
    async fn update_allow_notifications(&self, sub: &str, allow: bool) -> Result<()>;
}
