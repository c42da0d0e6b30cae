//! Configuration loader
//!
//! Loads application configuration from a config file with environment
//! variable overrides on top. Every field has a sensible default, so a
//! missing file and an empty environment still yield a usable config
//! (the spreadsheet ids and the gateway URL simply stay blank until the
//! operator fills them in).
//!
//! ## Loading Strategy
//! 1. Read `.env` if present (via dotenvy)
//! 2. Load the first config file found by [`probe_config_paths`], or
//!    start from defaults when none exists
//! 3. Apply environment variable overrides
//!
//! ## Environment Variables
//! - `ORDERDESK_SHEETS_BASE_URL`: Tabular-query endpoint base URL
//! - `ORDERDESK_ORDERS_SPREADSHEET_ID`: Orders/users spreadsheet id
//! - `ORDERDESK_PROJECTS_SPREADSHEET_ID`: Planning spreadsheet id
//! - `ORDERDESK_ORDERS_SHEET`: Orders sheet name
//! - `ORDERDESK_USERS_SHEET`: Users sheet name
//! - `ORDERDESK_PROJECTS_SHEET`: Planning sheet name
//! - `ORDERDESK_GATEWAY_EXEC_URL`: Script gateway exec endpoint
//! - `ORDERDESK_RATES_BASE_URL`: Exchange-rate API base URL
//! - `ORDERDESK_CACHE_TTL_SECONDS`: Orders-cache freshness window
//! - `ORDERDESK_STORAGE_DIR`: Directory for the local store
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./orderdesk.json` or `./orderdesk.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use orderdesk_domain::{Config, OrderDeskError, Result};

/// Load configuration from file (if any) plus environment overrides.
///
/// # Errors
/// Returns `OrderDeskError::Config` if a found file cannot be parsed or
/// a set environment variable holds an invalid value.
pub fn load() -> Result<Config> {
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("loaded .env file");
    }

    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("no config file found, starting from defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from defaults plus environment variables only.
///
/// # Errors
/// Returns `OrderDeskError::Config` if a set variable has an invalid
/// value (e.g. a non-numeric cache TTL).
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `OrderDeskError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(OrderDeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            OrderDeskError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| OrderDeskError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| OrderDeskError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| OrderDeskError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(OrderDeskError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("orderdesk.json"),
            cwd.join("orderdesk.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("orderdesk.json"),
                exe_dir.join("orderdesk.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    override_string("ORDERDESK_SHEETS_BASE_URL", &mut config.sheets.base_url);
    override_string("ORDERDESK_ORDERS_SPREADSHEET_ID", &mut config.sheets.orders_spreadsheet_id);
    override_string(
        "ORDERDESK_PROJECTS_SPREADSHEET_ID",
        &mut config.sheets.projects_spreadsheet_id,
    );
    override_string("ORDERDESK_ORDERS_SHEET", &mut config.sheets.orders_sheet);
    override_string("ORDERDESK_USERS_SHEET", &mut config.sheets.users_sheet);
    override_string("ORDERDESK_PROJECTS_SHEET", &mut config.sheets.projects_sheet);
    override_string("ORDERDESK_GATEWAY_EXEC_URL", &mut config.gateway.exec_url);
    override_string("ORDERDESK_RATES_BASE_URL", &mut config.rates.base_url);
    override_string("ORDERDESK_STORAGE_DIR", &mut config.storage.dir);

    if let Ok(raw) = std::env::var("ORDERDESK_CACHE_TTL_SECONDS") {
        config.cache.ttl_seconds = raw
            .parse::<u64>()
            .map_err(|e| OrderDeskError::Config(format!("Invalid cache TTL: {}", e)))?;
    }

    Ok(())
}

fn override_string(key: &str, target: &mut String) {
    if let Ok(value) = std::env::var(key) {
        *target = value;
    }
}
