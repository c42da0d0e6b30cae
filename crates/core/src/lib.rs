//! # OrderDesk Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Role policy tables for status transitions and edit rights
//! - Price reconciliation and order submission rules
//! - Port/adapter interfaces (traits)
//! - Session, order, and dashboard services
//!
//! ## Architecture Principles
//! - Only depends on `orderdesk-common` and `orderdesk-domain`
//! - No HTTP, filesystem, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod policy;
pub mod reconcile;
