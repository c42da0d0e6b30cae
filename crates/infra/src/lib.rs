//! # OrderDesk Infrastructure
//!
//! Adapters behind the core ports: the spreadsheet tabular-query reader,
//! the script gateway writer, the exchange-rate provider, the file-backed
//! local store, and configuration loading.
//!
//! ## Architecture
//! - Implements the traits defined in `orderdesk-core`
//! - Owns all HTTP, filesystem, and serialization concerns
//! - Converts external errors into domain errors at the boundary

pub mod config;
pub mod errors;
pub mod gateway;
pub mod http;
pub mod rates;
pub mod sheets;
pub mod store;

pub use errors::InfraError;
pub use gateway::ScriptGateway;
pub use http::HttpClient;
pub use rates::NbpRatesProvider;
pub use sheets::SheetsClient;
pub use store::FileStore;
