//! Session service - login, current-session lookup, logout

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use orderdesk_common::time::Clock;
use orderdesk_domain::constants::CURRENT_USER_KEY;
use orderdesk_domain::{OrderDeskError, Result, TokenClaims};
use tracing::{debug, warn};

use super::ports::{AuthGateway, LocalStore};

/// Decode the claims from the payload segment of a session token.
///
/// Only the payload is parsed; signature verification is the gateway's
/// responsibility. Any structural problem is a `Parse` error.
pub fn decode_token_claims(token: &str) -> Result<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| OrderDeskError::Parse("Token is missing a payload segment".into()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| OrderDeskError::Parse(format!("Token payload is not valid base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| OrderDeskError::Parse(format!("Token payload is not valid claims: {e}")))
}

/// Session lifecycle built on the auth gateway and the local store.
///
/// The stored token is the single source of truth for the session; claims
/// are re-decoded on every lookup so expiry is always enforced.
pub struct SessionService {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn LocalStore>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        store: Arc<dyn LocalStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { gateway, store, clock }
    }

    /// Log in: obtain a token for `sub`, persist it, and return its claims.
    ///
    /// A token that does not decode, or that is already expired, is an
    /// `Auth` failure and is not stored.
    pub async fn login(&self, sub: &str) -> Result<TokenClaims> {
        if sub.trim().is_empty() {
            return Err(OrderDeskError::Auth("Brak identyfikatora użytkownika".into()));
        }
        let token = self.gateway.login_user(sub).await?;
        let claims = decode_token_claims(&token)?;
        if self.is_expired(&claims) {
            return Err(OrderDeskError::Auth("Received an already expired token".into()));
        }
        self.store.set(CURRENT_USER_KEY, &token)?;
        debug!(sub = %claims.sub, role = %claims.role, "session established");
        Ok(claims)
    }

    /// The current session, if a stored token exists and is still valid.
    ///
    /// An undecodable or expired token is cleared from the store and
    /// reported as no session rather than an error.
    pub fn current_session(&self) -> Result<Option<TokenClaims>> {
        let Some(token) = self.store.get(CURRENT_USER_KEY)? else {
            return Ok(None);
        };
        let claims = match decode_token_claims(&token) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(error = %err, "stored token is unreadable, clearing session");
                self.store.remove(CURRENT_USER_KEY)?;
                return Ok(None);
            }
        };
        if self.is_expired(&claims) {
            debug!(sub = %claims.sub, "stored token expired, clearing session");
            self.store.remove(CURRENT_USER_KEY)?;
            return Ok(None);
        }
        Ok(Some(claims))
    }

    /// Drop the stored session token.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY)
    }

    fn is_expired(&self, claims: &TokenClaims) -> bool {
        claims.exp <= self.clock.secs_since_epoch()
    }
}
