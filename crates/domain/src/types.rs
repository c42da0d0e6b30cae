//! Core data types

pub mod filters;
pub mod order;
pub mod session;

pub use filters::*;
pub use order::*;
pub use session::*;
