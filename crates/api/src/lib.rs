//! # OrderDesk App
//!
//! Application layer - context wiring and the command boundary.
//!
//! This crate contains:
//! - Command functions (the surface a UI shell calls)
//! - Application context (dependency injection)
//! - Command-execution logging helpers
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture exactly once
//! - Commands translate domain results across the boundary

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
