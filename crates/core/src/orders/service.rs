//! Orders service - listing, mutation, and policy enforcement

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDateTime, Utc};
use orderdesk_common::time::Clock;
use orderdesk_domain::{
    Currency, FilterSpec, Order, OrderDeskError, OrderDraft, OrdersPage, PriceUpdate, Result,
    Status, TokenClaims,
};
use tracing::debug;

use super::ports::{OrdersGateway, OrdersSource};
use crate::policy;
use crate::reconcile;

/// Result of a tracked page fetch.
///
/// Filter changes can overlap in flight; only the most recently started
/// fetch is allowed to land, earlier ones report `Superseded` and their
/// result is dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied(OrdersPage),
    Superseded,
}

/// Order listing and mutation service.
///
/// Reads go through the source, writes through the gateway. Every
/// mutation re-checks the role policy here; callers present only the
/// actions the policy allows, but the service is the enforcement point.
pub struct OrdersService {
    source: Arc<dyn OrdersSource>,
    gateway: Arc<dyn OrdersGateway>,
    clock: Arc<dyn Clock>,
    fetch_generation: AtomicU64,
}

impl OrdersService {
    pub fn new(
        source: Arc<dyn OrdersSource>,
        gateway: Arc<dyn OrdersGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { source, gateway, clock, fetch_generation: AtomicU64::new(0) }
    }

    /// Fetch one page, dropping the result if a newer fetch started while
    /// this one was in flight.
    pub async fn fetch_page_latest(&self, filter: &FilterSpec) -> Result<FetchOutcome> {
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let page = self.source.fetch_page(filter).await?;
        if self.fetch_generation.load(Ordering::SeqCst) == generation {
            Ok(FetchOutcome::Applied(page))
        } else {
            debug!(generation, "page fetch superseded by a newer one");
            Ok(FetchOutcome::Superseded)
        }
    }

    /// Fetch one page without supersession tracking.
    pub async fn fetch_page(&self, filter: &FilterSpec) -> Result<OrdersPage> {
        self.source.fetch_page(filter).await
    }

    /// Fetch a single order.
    pub async fn order_by_id(&self, id: &str) -> Result<Order> {
        self.source
            .order_by_id(id)
            .await?
            .ok_or_else(|| OrderDeskError::NotFound(format!("Order {id} does not exist")))
    }

    /// Distinct creator names, for the creator filter.
    pub async fn unique_creators(&self) -> Result<Vec<String>> {
        self.source.unique_creators().await
    }

    /// Position label for a user.
    pub async fn position_by_sub(&self, sub: &str) -> Result<Option<String>> {
        self.source.position_by_sub(sub).await
    }

    /// Whether the user has notifications enabled.
    pub async fn allow_notifications(&self, sub: &str) -> Result<bool> {
        self.source.allow_notifications(sub).await
    }

    /// Toggle the user's notification preference.
    pub async fn set_allow_notifications(&self, sub: &str, allow: bool) -> Result<()> {
        self.gateway.update_allow_notifications(sub, allow).await
    }

    /// Move a uniform selection of orders to `target`.
    ///
    /// The transition must be one the role's bulk-action table offers for
    /// the selection's status, and price-gated targets require every
    /// selected order to carry a positive unit price. Returns the orders
    /// with status and modification metadata stamped locally, so callers
    /// can update their view without a refetch.
    pub async fn transition_status(
        &self,
        claims: &TokenClaims,
        selected: &[Order],
        target: Status,
    ) -> Result<Vec<Order>> {
        if selected.is_empty() {
            return Err(OrderDeskError::Validation("Nie wybrano zamówień".into()));
        }
        let statuses: Vec<Status> = selected.iter().map(|o| o.status).collect();
        let allowed = policy::bulk_actions(claims.role, &statuses)
            .iter()
            .any(|action| action.target == target);
        if !allowed {
            return Err(OrderDeskError::Permission(format!(
                "Role {} may not move this selection to {target}",
                claims.role
            )));
        }
        if policy::requires_price(target) {
            let unpriced =
                selected.iter().find(|o| o.price_per_unit.map_or(true, |price| price <= 0.0));
            if let Some(order) = unpriced {
                return Err(OrderDeskError::Validation(format!(
                    "Zamówienie {} nie ma ustalonej ceny",
                    order.id
                )));
            }
        }

        let ids: Vec<String> = selected.iter().map(|o| o.id.clone()).collect();
        self.gateway.update_orders_status(&ids, target, &claims.sub).await?;
        Ok(self.stamp_selection(selected, target, claims))
    }

    /// Mark a selection of orders as rejected.
    ///
    /// Rejection is open to every role but the stock controller, applies
    /// to any non-empty selection, and skips the price gate.
    pub async fn reject_orders(
        &self,
        claims: &TokenClaims,
        selected: &[Order],
    ) -> Result<Vec<Order>> {
        if selected.is_empty() {
            return Err(OrderDeskError::Validation("Nie wybrano zamówień".into()));
        }
        if !policy::can_reject(claims.role) {
            return Err(OrderDeskError::Permission(format!(
                "Role {} may not reject orders",
                claims.role
            )));
        }
        let ids: Vec<String> = selected.iter().map(|o| o.id.clone()).collect();
        self.gateway.update_orders_status(&ids, Status::Odrzucone, &claims.sub).await?;
        Ok(self.stamp_selection(selected, Status::Odrzucone, claims))
    }

    /// Change an order's unit price inline.
    ///
    /// A missing currency defaults to PLN before comparison, and an edit
    /// that changes neither price nor currency is a no-op that never
    /// reaches the gateway. Returns the updated order, or `None` for the
    /// no-op case.
    pub async fn update_order_price(
        &self,
        claims: &TokenClaims,
        order: &Order,
        new_price: f64,
        new_currency: Option<Currency>,
    ) -> Result<Option<Order>> {
        if !policy::can_edit_price_inline(claims.role, order.status) {
            return Err(OrderDeskError::Permission(format!(
                "Role {} may not edit the price of an order in status {}",
                claims.role, order.status
            )));
        }
        if !new_price.is_finite() || new_price < 0.0 {
            return Err(OrderDeskError::Validation("Cena nie może być ujemna".into()));
        }
        let new_currency = new_currency.or(order.currency).unwrap_or_default();
        if Some(new_price) == order.price_per_unit && Some(new_currency) == order.currency {
            return Ok(None);
        }

        let update = PriceUpdate {
            id: order.id.clone(),
            price_per_unit: new_price,
            quantity: order.quantity,
            currency: new_currency,
            sub: claims.sub.clone(),
        };
        self.gateway.update_order_price(&update).await?;

        let mut updated = order.clone();
        updated.price_per_unit = Some(new_price);
        updated.total_price = Some(reconcile::total_for_price(new_price, order.quantity));
        updated.currency = Some(new_currency);
        Ok(Some(updated))
    }

    /// Validate and submit a draft, as an add or an update depending on
    /// whether it carries an id.
    pub async fn save_order(&self, claims: &TokenClaims, draft: &OrderDraft) -> Result<()> {
        reconcile::validate_draft(draft)?;
        let payload = reconcile::prepare_order_to_send(draft, claims, self.now());
        if payload.id.is_none() {
            self.gateway.add_orders(std::slice::from_ref(&payload)).await
        } else {
            self.gateway.update_orders(std::slice::from_ref(&payload)).await
        }
    }

    fn stamp_selection(
        &self,
        selected: &[Order],
        target: Status,
        claims: &TokenClaims,
    ) -> Vec<Order> {
        let now = self.now();
        selected
            .iter()
            .map(|order| {
                let mut updated = order.clone();
                updated.status = target;
                updated.modified_at = Some(now);
                updated.modified_by = claims.name.clone();
                updated
            })
            .collect()
    }

    fn now(&self) -> NaiveDateTime {
        DateTime::<Utc>::from(self.clock.system_time()).naive_utc()
    }
}
