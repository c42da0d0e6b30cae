//! Port interfaces for session management
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use orderdesk_domain::Result;

/// Trait for exchanging a user identifier for a signed session token
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Ask the gateway to issue a token for the given user identifier
    async fn login_user(&self, sub: &str) -> Result<String>;
}

/// Trait for the small key-value store session state lives in
///
/// Implementations are expected to be cheap and synchronous; the store
/// holds a handful of strings (token, theme, filter snapshots).
pub trait LocalStore: Send + Sync {
    /// Read a value, `None` when the key has never been set
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, overwriting any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
