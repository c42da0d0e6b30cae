//! Command execution helpers
//!
//! Provides the timing-and-logging wrapper every command goes through.

use std::time::Instant;

use orderdesk_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with automatic timing and logging
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &Arc<AppContext>) -> Result<MyResponse> {
///     execute_logged("my_module::my_command", || async {
///         ctx.some_service.do_something().await
///     })
///     .await
/// }
/// ```
pub async fn execute_logged<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let elapsed = start.elapsed();
    log_command_execution(command_name, elapsed, result.is_ok());
    if let Err(err) = &result {
        tracing::debug!(
            command = command_name,
            error_type = error_label(err),
            error = %err,
            "command returned an error"
        );
    }

    result
}
