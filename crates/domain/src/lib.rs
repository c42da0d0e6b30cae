//! # OrderDesk Domain
//!
//! Pure data types shared across all crates.
//!
//! This crate contains:
//! - Order, status, role, and currency model
//! - Session claims and filter specifications
//! - Error types and Result definitions
//! - Configuration structures
//! - Shared constants
//!
//! ## Architecture
//! - No dependencies on other OrderDesk crates
//! - Only external dependencies allowed
//! - Pure data structures and utilities

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
