//! Single-slot TTL cache primitive
//!
//! Holds at most one cached value together with the instant it was stored.
//! Freshness is judged against a configured TTL through the [`Clock`]
//! abstraction, so expiry can be tested deterministically with
//! [`MockClock`](crate::time::MockClock).

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::time::Clock;

struct Entry<T> {
    value: T,
    stored_at: Instant,
}

/// State of the cache slot at the moment of inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState<T> {
    /// A value is present and younger than the TTL
    Fresh(T),
    /// A value is present but older than the TTL
    Stale(T),
    /// No value has been stored (or the slot was cleared)
    Empty,
}

/// A thread-safe cache holding a single value with a time-to-live
///
/// Callers decide what to do with a stale value; the cache does not evict
/// on its own. This keeps stale-while-revalidate policies in the caller's
/// hands.
pub struct SlotCache<T> {
    slot: Mutex<Option<Entry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> SlotCache<T> {
    /// Create an empty cache with the given TTL
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { slot: Mutex::new(None), ttl, clock }
    }

    /// Inspect the slot without mutating it
    pub fn peek(&self) -> SlotState<T> {
        let guard = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.as_ref() {
            None => SlotState::Empty,
            Some(entry) => {
                let age = self.clock.now().saturating_duration_since(entry.stored_at);
                if age < self.ttl {
                    SlotState::Fresh(entry.value.clone())
                } else {
                    SlotState::Stale(entry.value.clone())
                }
            }
        }
    }

    /// Store a value, stamping it with the current instant
    pub fn store(&self, value: T) {
        let mut guard = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(Entry { value, stored_at: self.clock.now() });
    }

    /// Drop any cached value
    pub fn clear(&self) {
        let mut guard = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }
}
