//! Command boundary - the surface a UI shell calls
//!
//! Plain async functions over the application context. Every command is
//! instrumented with the logging helper and returns a domain `Result`;
//! nothing here panics, and nothing retries beyond the HTTP client's
//! transient-error policy.

mod dashboard;
mod filters;
mod health;
mod orders;
mod session;
mod settings;

pub use dashboard::*;
pub use filters::*;
pub use health::*;
pub use orders::*;
pub use session::*;
pub use settings::*;
