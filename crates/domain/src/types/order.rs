//! Order model: statuses, currencies, records, and write payloads.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{OrderDeskError, Result};

/// Workflow status of a purchase order.
///
/// The wire representation is the Polish label stored in the sheet's status
/// column; variants serialize to exactly those labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub enum Status {
    #[serde(rename = "nowe")]
    Nowe,
    #[serde(rename = "do potwierdzenia")]
    DoPotwierdzenia,
    #[serde(rename = "do opłaty")]
    DoOplaty,
    #[serde(rename = "opłacone")]
    Oplacone,
    #[serde(rename = "w drodze do biura")]
    WDrodzeDoBiura,
    #[serde(rename = "w drodze na budowę")]
    WDrodzeNaBudowe,
    #[serde(rename = "na magazynie")]
    NaMagazynie,
    #[serde(rename = "otrzymane")]
    Otrzymane,
    #[serde(rename = "do wyjaśnienia")]
    DoWyjasnienia,
    #[serde(rename = "anulowane")]
    Anulowane,
    #[serde(rename = "odrzucone")]
    Odrzucone,
    #[serde(rename = "błędne")]
    Bledne,
}

impl Status {
    /// All statuses in workflow order.
    pub const ALL: [Self; 12] = [
        Self::Nowe,
        Self::DoPotwierdzenia,
        Self::DoOplaty,
        Self::Oplacone,
        Self::WDrodzeDoBiura,
        Self::WDrodzeNaBudowe,
        Self::NaMagazynie,
        Self::Otrzymane,
        Self::DoWyjasnienia,
        Self::Anulowane,
        Self::Odrzucone,
        Self::Bledne,
    ];

    /// The Polish label as stored in the sheet.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nowe => "nowe",
            Self::DoPotwierdzenia => "do potwierdzenia",
            Self::DoOplaty => "do opłaty",
            Self::Oplacone => "opłacone",
            Self::WDrodzeDoBiura => "w drodze do biura",
            Self::WDrodzeNaBudowe => "w drodze na budowę",
            Self::NaMagazynie => "na magazynie",
            Self::Otrzymane => "otrzymane",
            Self::DoWyjasnienia => "do wyjaśnienia",
            Self::Anulowane => "anulowane",
            Self::Odrzucone => "odrzucone",
            Self::Bledne => "błędne",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Nowe
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = OrderDeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| OrderDeskError::Parse(format!("Unknown order status: {s}")))
    }
}

/// Settlement currency of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub enum Currency {
    #[serde(rename = "PLN")]
    Pln,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Self; 3] = [Self::Pln, Self::Eur, Self::Usd];

    /// ISO 4217 code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pln => "PLN",
            Self::Eur => "EUR",
            Self::Usd => "USD",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Pln
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = OrderDeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code() == s)
            .ok_or_else(|| OrderDeskError::Parse(format!("Unknown currency: {s}")))
    }
}

/// One purchase order as read from the sheet.
///
/// `price_per_unit`, `total_price`, and `currency` are optional because rows
/// created without pricing leave those cells empty. `quantity` defaults to 0
/// for the same reason. Whenever both commercial inputs are present,
/// `total_price == round(quantity × price_per_unit, 2)` holds; the
/// reconciliation engine is the sole authority for repairing that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub struct Order {
    pub id: String,
    pub created_at: Option<NaiveDateTime>,
    pub created_by: String,
    pub modified_at: Option<NaiveDateTime>,
    pub modified_by: String,
    pub store: String,
    pub price_per_unit: Option<f64>,
    pub total_price: Option<f64>,
    pub currency: Option<Currency>,
    pub order_name: String,
    pub status: Status,
    pub deadline: Option<NaiveDate>,
    pub object: String,
    pub link: String,
    pub quantity: u32,
    pub address: String,
    pub note: String,
    pub tgid: Option<String>,
}

/// Raw form state for creating or editing an order.
///
/// The three commercial fields are kept as entered (comma or dot decimals,
/// possibly empty); validation and normalization happen on submit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub struct OrderDraft {
    pub id: Option<String>,
    pub order_name: String,
    pub object: String,
    pub deadline: String,
    pub quantity: String,
    pub price_per_unit: String,
    pub total_price: String,
    pub currency: Option<Currency>,
    pub link: String,
    pub store: String,
    pub address: String,
    pub note: String,
    pub status: Status,
    pub created_at: Option<NaiveDateTime>,
    pub created_by: String,
    pub tgid: Option<String>,
}

/// Normalized write payload sent to the gateway for add/update calls.
///
/// Timestamps are pre-formatted sheet strings (`YYYY-MM-DD HH:MM:SS`);
/// `tgid` serializes as an explicit `null` when absent, matching what the
/// gateway expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub struct OrderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub order_name: String,
    pub object: String,
    pub deadline: String,
    pub quantity: u32,
    pub price_per_unit: f64,
    pub total_price: f64,
    pub currency: Currency,
    pub link: String,
    pub store: String,
    pub address: String,
    pub note: String,
    pub status: Status,
    pub created_at: String,
    pub modified_at: String,
    pub created_by: String,
    pub modified_by: String,
    pub user_name: String,
    pub sub: String,
    pub tgid: Option<String>,
}

/// Inline price-edit payload for the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub struct PriceUpdate {
    pub id: String,
    pub price_per_unit: f64,
    pub quantity: u32,
    pub currency: Currency,
    pub sub: String,
}

/// One page of the order listing plus the data fetched alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub struct OrdersPage {
    /// Orders matching the filter, in requested sort order.
    pub orders: Vec<Order>,
    /// Active project names from the planning sheet.
    pub projects: Vec<String>,
    /// Total number of matching rows, ignoring pagination.
    pub total: u64,
}
