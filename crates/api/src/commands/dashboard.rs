//! Dashboard command

use std::sync::Arc;

use orderdesk_core::dashboard::DashboardStats;
use orderdesk_domain::Result;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Headline statistics over the last 90 days of orders.
pub async fn dashboard_stats(ctx: &Arc<AppContext>) -> Result<DashboardStats> {
    execute_logged("dashboard::dashboard_stats", || ctx.dashboard.stats()).await
}
