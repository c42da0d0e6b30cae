//! Session identity decoded from the bearer token.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_POSITION;
use crate::errors::{OrderDeskError, Result};

/// Role carried in the token; each role sees a distinct slice of the
/// status-transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub enum Role {
    Admin,
    OrderManager,
    Approver,
    Accountant,
    StockController,
}

impl Role {
    /// All roles known to the policy tables.
    pub const ALL: [Self; 5] =
        [Self::Admin, Self::OrderManager, Self::Approver, Self::Accountant, Self::StockController];

    /// The snake_case identifier carried in the token payload.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::OrderManager => "order_manager",
            Self::Approver => "approver",
            Self::Accountant => "accountant",
            Self::StockController => "stock_controller",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = OrderDeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| OrderDeskError::Parse(format!("Unknown role: {s}")))
    }
}

fn default_position() -> String {
    DEFAULT_POSITION.to_string()
}

/// Claims carried in the token payload.
///
/// Only the payload segment of the token is decoded client-side; the
/// signature is the gateway's concern. `exp` is epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub struct TokenClaims {
    pub sub: String,
    pub role: Role,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_position")]
    pub position: String,
    pub exp: i64,
}
