//! Order listing, mutation, and caching.

mod cache;
mod options;
mod ports;
mod service;

pub use cache::OrdersCache;
pub use options::{object_options, store_options};
pub use ports::{OrdersGateway, OrdersSource};
pub use service::{FetchOutcome, OrdersService};
