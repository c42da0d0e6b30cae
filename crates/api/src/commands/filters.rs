//! Filter snapshot commands
//!
//! The last-applied listing filters live on the context for the lifetime
//! of the process; a user returning to the listing resumes where they
//! left off, and a user without a snapshot lands on their role's inbox.

use std::sync::Arc;

use orderdesk_core::policy;
use orderdesk_domain::{FilterSpec, Result, TokenClaims};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Remember the last-applied listing filters.
pub async fn save_filter_snapshot(ctx: &Arc<AppContext>, spec: FilterSpec) -> Result<()> {
    execute_logged("filters::save_filter_snapshot", || async {
        ctx.save_filter_snapshot(spec);
        Ok(())
    })
    .await
}

/// The saved listing filters, if any.
pub async fn load_filter_snapshot(ctx: &Arc<AppContext>) -> Result<Option<FilterSpec>> {
    execute_logged("filters::load_filter_snapshot", || async {
        Ok(ctx.load_filter_snapshot())
    })
    .await
}

/// Forget the saved listing filters.
pub async fn clear_filter_snapshot(ctx: &Arc<AppContext>) -> Result<()> {
    execute_logged("filters::clear_filter_snapshot", || async {
        ctx.clear_filter_snapshot();
        Ok(())
    })
    .await
}

/// Filters to apply when the listing opens: the saved snapshot when one
/// exists, otherwise the defaults with the role's status inbox applied.
pub async fn initial_filters(ctx: &Arc<AppContext>, claims: &TokenClaims) -> Result<FilterSpec> {
    execute_logged("filters::initial_filters", || async {
        if let Some(saved) = ctx.load_filter_snapshot() {
            return Ok(saved);
        }
        let statuses = policy::default_status_filter(claims.role)
            .into_iter()
            .map(|status| status.as_str().to_string())
            .collect();
        Ok(FilterSpec { statuses, ..FilterSpec::default() })
    })
    .await
}
