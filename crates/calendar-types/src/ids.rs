//! Type-safe event identifier.
//!
//! Identifiers are plain integers allocated by the store, starting at 1 and
//! strictly increasing for the lifetime of the process. They are never
//! reused, even after the event they named has been deleted.

use serde::{Deserialize, Serialize};

/// Unique identifier for an event in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// The first identifier a fresh store hands out.
    pub const FIRST: Self = Self(1);

    /// Sorts below every identifier the store can allocate.
    ///
    /// Used as the tie-breaker when searching for the first event that
    /// starts at or after a given instant.
    pub const MIN: Self = Self(0);

    /// Wrap a raw integer.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the inner integer value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identifier after this one, or `None` once the id space is spent.
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<EventId> for u64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}
