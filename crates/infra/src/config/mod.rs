//! Configuration loading
//!
//! Probes well-known file locations, then overlays `ORDERDESK_*`
//! environment variables on top of the file (or the defaults).

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
