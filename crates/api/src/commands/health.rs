//! Health check command

use std::sync::Arc;

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

/// Get application health status
///
/// Returns the overall health score, individual component checks, and
/// the timestamp of the probe. Always succeeds; unhealthy components are
/// reported in the payload rather than as an error.
pub async fn app_health(ctx: &Arc<AppContext>) -> HealthStatus {
    ctx.health_check().await
}
