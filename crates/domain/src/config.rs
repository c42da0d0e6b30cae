//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::ORDERS_CACHE_TTL_SECS;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheets: SheetsConfig,
    pub gateway: GatewayConfig,
    pub rates: RatesConfig,
    pub cache: CacheConfig,
    pub storage: StorageConfig,
}

/// Spreadsheet tabular-query endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Base URL of the tabular-query endpoint.
    pub base_url: String,
    /// Spreadsheet holding the orders and users sheets.
    pub orders_spreadsheet_id: String,
    /// Spreadsheet holding the active-projects planning sheet.
    pub projects_spreadsheet_id: String,
    pub orders_sheet: String,
    pub users_sheet: String,
    pub projects_sheet: String,
}

/// Remote-procedure-call gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// URL the gateway exec endpoint is served from.
    pub exec_url: String,
}

/// Exchange-rate provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    pub base_url: String,
}

/// Order-list cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
}

/// Local key-value store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory the file-backed store keeps its state in.
    pub dir: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docs.google.com/spreadsheets/d".to_string(),
            orders_spreadsheet_id: String::new(),
            projects_spreadsheet_id: String::new(),
            orders_sheet: "orders".to_string(),
            users_sheet: "users".to_string(),
            projects_sheet: "Zakres".to_string(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { exec_url: String::new() }
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self { base_url: "https://api.nbp.pl/api".to_string() }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: ORDERS_CACHE_TTL_SECS }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: ".orderdesk".to_string() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheets: SheetsConfig::default(),
            gateway: GatewayConfig::default(),
            rates: RatesConfig::default(),
            cache: CacheConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}
