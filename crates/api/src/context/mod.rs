//! Application context - dependency injection container

use std::sync::{Arc, Mutex};
use std::time::Duration;

use orderdesk_common::time::{Clock, SystemClock};
use orderdesk_core::auth::{AuthGateway, LocalStore, SessionService};
use orderdesk_core::dashboard::{DashboardService, RatesProvider};
use orderdesk_core::orders::{OrdersCache, OrdersGateway, OrdersService, OrdersSource};
use orderdesk_domain::{Config, FilterSpec, Result};
use orderdesk_infra::{FileStore, HttpClient, NbpRatesProvider, ScriptGateway, SheetsClient};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
///
/// Construction wires the hexagon exactly once: one HTTP client shared by
/// every adapter, one clock, one local store. Nothing global, nothing
/// ambient.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn LocalStore>,
    pub session: Arc<SessionService>,
    pub orders: Arc<OrdersService>,
    pub cache: OrdersCache,
    pub dashboard: Arc<DashboardService>,

    // Last-applied listing filters; session-scoped, lost on process exit.
    filter_snapshot: Mutex<Option<FilterSpec>>,
}

impl AppContext {
    /// Create a new application context, loading configuration from the
    /// environment and config files.
    pub fn new() -> Result<Self> {
        Self::new_with_config(orderdesk_infra::config::load()?)
    }

    /// Create a new application context with custom configuration
    ///
    /// Tests use this to point the adapters at local mock servers and a
    /// temporary storage directory.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let http = HttpClient::builder().user_agent("orderdesk").build()?;

        let store: Arc<dyn LocalStore> = Arc::new(FileStore::open(&config.storage)?);

        let sheets = Arc::new(SheetsClient::new(
            http.clone(),
            config.sheets.clone(),
            Arc::clone(&clock),
        ));
        let source: Arc<dyn OrdersSource> = sheets;

        let script_gateway = Arc::new(ScriptGateway::new(http.clone(), config.gateway.clone()));
        let auth_gateway: Arc<dyn AuthGateway> = script_gateway.clone();
        let orders_gateway: Arc<dyn OrdersGateway> = script_gateway;

        let session = Arc::new(SessionService::new(
            auth_gateway,
            Arc::clone(&store),
            Arc::clone(&clock),
        ));

        let orders = Arc::new(OrdersService::new(
            Arc::clone(&source),
            orders_gateway,
            Arc::clone(&clock),
        ));

        let cache = OrdersCache::new(
            Arc::clone(&source),
            Duration::from_secs(config.cache.ttl_seconds),
            Arc::clone(&clock),
        );

        let rates: Arc<dyn RatesProvider> =
            Arc::new(NbpRatesProvider::new(http, config.rates.clone()));
        let dashboard = Arc::new(DashboardService::new(Arc::clone(&source), rates));

        Ok(Self {
            config,
            store,
            session,
            orders,
            cache,
            dashboard,
            filter_snapshot: Mutex::new(None),
        })
    }

    /// Remember the last-applied listing filters for this session.
    pub fn save_filter_snapshot(&self, spec: FilterSpec) {
        *self.snapshot_lock() = Some(spec);
    }

    /// The last-applied listing filters, if any were saved this session.
    pub fn load_filter_snapshot(&self) -> Option<FilterSpec> {
        self.snapshot_lock().clone()
    }

    /// Forget the saved listing filters.
    pub fn clear_filter_snapshot(&self) {
        *self.snapshot_lock() = None;
    }

    fn snapshot_lock(&self) -> std::sync::MutexGuard<'_, Option<FilterSpec>> {
        match self.filter_snapshot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Check health of the wired components
    ///
    /// The sheets endpoint is probed with a real (cheap) query; the local
    /// store with a read. The gateway and the cache carry no state of
    /// their own and are assumed healthy once constructed.
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        status = status.add_component(match self.orders.unique_creators().await {
            Ok(_) => ComponentHealth::healthy("sheets"),
            Err(e) => {
                tracing::warn!(error = %e, "sheets health probe failed");
                ComponentHealth::unhealthy("sheets", e.to_string())
            }
        });

        status = status.add_component(
            match self.store.get(orderdesk_domain::constants::THEME_KEY) {
                Ok(_) => ComponentHealth::healthy("local_store"),
                Err(e) => ComponentHealth::unhealthy("local_store", e.to_string()),
            },
        );

        status = status.add_component(ComponentHealth::healthy("gateway"));
        status = status.add_component(ComponentHealth::healthy("orders_cache"));

        status.calculate_score();
        status
    }

    /// Shutdown the application context gracefully
    ///
    /// Intentionally a no-op beyond logging: every component cleans up
    /// via `Drop`. The cache's background refresh runs on `tokio::spawn`
    /// and is cancelled with the runtime; the file store flushes on every
    /// write, so there is nothing to drain here. Idempotent.
    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!("shutdown called on AppContext");
        Ok(())
    }
}
