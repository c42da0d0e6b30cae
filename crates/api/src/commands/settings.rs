//! Settings commands - theme preference and notification opt-in

use std::sync::Arc;

use orderdesk_domain::constants::{DEFAULT_THEME, THEME_KEY};
use orderdesk_domain::Result;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// The stored theme preference, `nord` when none has been saved.
pub async fn get_theme(ctx: &Arc<AppContext>) -> Result<String> {
    execute_logged("settings::get_theme", || async {
        Ok(ctx.store.get(THEME_KEY)?.unwrap_or_else(|| DEFAULT_THEME.to_string()))
    })
    .await
}

/// Persist the theme preference.
pub async fn set_theme(ctx: &Arc<AppContext>, theme: &str) -> Result<()> {
    execute_logged("settings::set_theme", || async { ctx.store.set(THEME_KEY, theme) }).await
}

/// Whether the user has order notifications enabled (users-sheet lookup).
pub async fn get_allow_notifications(ctx: &Arc<AppContext>, sub: &str) -> Result<bool> {
    execute_logged("settings::get_allow_notifications", || {
        ctx.orders.allow_notifications(sub)
    })
    .await
}

/// Toggle the notification opt-in through the gateway.
///
/// Returns the value now in effect: the requested one on success. On
/// failure the error propagates and the caller keeps showing the
/// previous value.
pub async fn set_allow_notifications(
    ctx: &Arc<AppContext>,
    sub: &str,
    allow: bool,
) -> Result<bool> {
    execute_logged("settings::set_allow_notifications", || async {
        ctx.orders.set_allow_notifications(sub, allow).await?;
        Ok(allow)
    })
    .await
}

/// The user's position label from the users sheet, if listed.
pub async fn user_position(ctx: &Arc<AppContext>, sub: &str) -> Result<Option<String>> {
    execute_logged("settings::user_position", || ctx.orders.position_by_sub(sub)).await
}
