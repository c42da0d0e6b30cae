//! Session commands - login, current-user lookup, logout

use std::sync::Arc;

use orderdesk_domain::{Result, TokenClaims};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Exchange the embedder-supplied user identifier for a session.
pub async fn login(ctx: &Arc<AppContext>, sub: &str) -> Result<TokenClaims> {
    execute_logged("session::login", || ctx.session.login(sub)).await
}

/// The currently signed-in user, if a valid session token is stored.
pub async fn current_user(ctx: &Arc<AppContext>) -> Result<Option<TokenClaims>> {
    execute_logged("session::current_user", || async { ctx.session.current_session() }).await
}

/// Drop the stored session.
pub async fn logout(ctx: &Arc<AppContext>) -> Result<()> {
    execute_logged("session::logout", || async {
        ctx.clear_filter_snapshot();
        ctx.session.logout()
    })
    .await
}
