//! # OrderDesk Common
//!
//! Foundation utilities with no dependency on other OrderDesk crates:
//! the [`time::Clock`] abstraction and the single-slot TTL cache the
//! stale-while-revalidate order cache is built on.

pub mod cache;
pub mod time;

pub use cache::{SlotCache, SlotState};
pub use time::{Clock, MockClock, SystemClock};
