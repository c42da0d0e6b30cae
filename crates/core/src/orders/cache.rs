//! Cached order listing with stale-while-revalidate
//!
//! The profile view and other read-mostly surfaces share one cached
//! default-filter fetch. A fresh value is served as-is; a stale value is
//! served immediately while a background task refreshes the slot; an
//! empty slot waits for the fetch. Background refresh failures are
//! logged and otherwise ignored, the stale value stays in place.

use std::sync::Arc;
use std::time::Duration;

use orderdesk_common::cache::{SlotCache, SlotState};
use orderdesk_common::time::Clock;
use orderdesk_domain::{FilterSpec, OrdersPage, Result};
use tracing::{debug, warn};

use super::ports::OrdersSource;

/// Single-slot cache over the default-filter order fetch.
#[derive(Clone)]
pub struct OrdersCache {
    source: Arc<dyn OrdersSource>,
    slot: Arc<SlotCache<OrdersPage>>,
}

impl OrdersCache {
    pub fn new(source: Arc<dyn OrdersSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { source, slot: Arc::new(SlotCache::new(ttl, clock)) }
    }

    /// Get the cached page, refreshing according to the slot state.
    pub async fn get(&self) -> Result<OrdersPage> {
        match self.slot.peek() {
            SlotState::Fresh(page) => Ok(page),
            SlotState::Stale(page) => {
                debug!("serving stale order cache, refreshing in background");
                let this = self.clone();
                tokio::spawn(async move {
                    if let Err(err) = this.refresh().await {
                        warn!(error = %err, "background order cache refresh failed");
                    }
                });
                Ok(page)
            }
            SlotState::Empty => self.refresh().await,
        }
    }

    /// Drop the cached value, forcing the next `get` to fetch.
    pub fn invalidate(&self) {
        self.slot.clear();
    }

    async fn refresh(&self) -> Result<OrdersPage> {
        let page = self.source.fetch_page(&FilterSpec::default()).await?;
        self.slot.store(page.clone());
        Ok(page)
    }
}
