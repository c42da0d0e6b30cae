use std::time::Duration;

use orderdesk_domain::OrderDeskError;
use tracing::{info, warn};

/// Install the process-wide tracing subscriber.
///
/// Intended for the embedding shell, once at startup. Honors `RUST_LOG`
/// and falls back to `info`; a second call is a no-op.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"orders::list_orders"`).
/// * `elapsed` - Duration the command execution took.
/// * `success` - Whether the command completed successfully.
///
/// The helper keeps the command wrappers concise and the event names
/// consistent. Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert an `OrderDeskError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &OrderDeskError) -> &'static str {
    match error {
        OrderDeskError::Auth(_) => "auth",
        OrderDeskError::Network(_) => "network",
        OrderDeskError::Parse(_) => "parse",
        OrderDeskError::Validation(_) => "validation",
        OrderDeskError::Permission(_) => "permission",
        OrderDeskError::NotFound(_) => "not_found",
        OrderDeskError::Config(_) => "config",
        OrderDeskError::Internal(_) => "internal",
    }
}
