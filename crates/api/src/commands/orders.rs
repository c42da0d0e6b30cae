//! Order commands - listing, mutation, and suggestion lists

use std::sync::Arc;

use orderdesk_core::orders::{self, FetchOutcome};
use orderdesk_domain::{
    Currency, FilterSpec, Order, OrderDraft, OrdersPage, Result, Status, TokenClaims,
};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Fetch one page of the order listing.
///
/// Generation-guarded: when a newer fetch has been started since this one,
/// the result is reported as superseded instead of applied, so a slow
/// response never overwrites a newer page.
pub async fn list_orders(ctx: &Arc<AppContext>, filter: &FilterSpec) -> Result<FetchOutcome> {
    execute_logged("orders::list_orders", || ctx.orders.fetch_page_latest(filter)).await
}

/// Fetch one order by id; unknown ids are a `NotFound` error.
pub async fn get_order(ctx: &Arc<AppContext>, id: &str) -> Result<Order> {
    execute_logged("orders::get_order", || ctx.orders.order_by_id(id)).await
}

/// Validate and submit a draft, adding or updating depending on its id.
pub async fn save_order(
    ctx: &Arc<AppContext>,
    claims: &TokenClaims,
    draft: &OrderDraft,
) -> Result<()> {
    execute_logged("orders::save_order", || async {
        ctx.orders.save_order(claims, draft).await?;
        ctx.cache.invalidate();
        Ok(())
    })
    .await
}

/// Move a uniform selection to a new status via the role's bulk actions.
pub async fn update_orders_status(
    ctx: &Arc<AppContext>,
    claims: &TokenClaims,
    selected: &[Order],
    target: Status,
) -> Result<Vec<Order>> {
    execute_logged("orders::update_orders_status", || async {
        let updated = ctx.orders.transition_status(claims, selected, target).await?;
        ctx.cache.invalidate();
        Ok(updated)
    })
    .await
}

/// Reject a selection of orders.
pub async fn reject_orders(
    ctx: &Arc<AppContext>,
    claims: &TokenClaims,
    selected: &[Order],
) -> Result<Vec<Order>> {
    execute_logged("orders::reject_orders", || async {
        let updated = ctx.orders.reject_orders(claims, selected).await?;
        ctx.cache.invalidate();
        Ok(updated)
    })
    .await
}

/// Change an order's unit price inline.
///
/// Returns `None` when the edit changes neither price nor currency; that
/// no-op never reaches the gateway.
pub async fn update_order_price(
    ctx: &Arc<AppContext>,
    claims: &TokenClaims,
    order: &Order,
    new_price: f64,
    new_currency: Option<Currency>,
) -> Result<Option<Order>> {
    execute_logged("orders::update_order_price", || async {
        let updated = ctx.orders.update_order_price(claims, order, new_price, new_currency).await?;
        if updated.is_some() {
            ctx.cache.invalidate();
        }
        Ok(updated)
    })
    .await
}

/// Distinct creator names for the created-by filter.
pub async fn unique_creators(ctx: &Arc<AppContext>) -> Result<Vec<String>> {
    execute_logged("orders::unique_creators", || ctx.orders.unique_creators()).await
}

/// Store suggestions: stores seen in the cached listing plus `inny`.
pub async fn store_options(ctx: &Arc<AppContext>) -> Result<Vec<String>> {
    execute_logged("orders::store_options", || async {
        let page = ctx.cache.get().await?;
        Ok(orders::store_options(&page.orders))
    })
    .await
}

/// Object suggestions: active projects plus the default objects, sorted.
pub async fn object_options(ctx: &Arc<AppContext>) -> Result<Vec<String>> {
    execute_logged("orders::object_options", || async {
        let page = ctx.cache.get().await?;
        Ok(orders::object_options(&page.projects))
    })
    .await
}

/// The cached default-filter page, for read-mostly surfaces.
pub async fn cached_orders(ctx: &Arc<AppContext>) -> Result<OrdersPage> {
    execute_logged("orders::cached_orders", || ctx.cache.get()).await
}
