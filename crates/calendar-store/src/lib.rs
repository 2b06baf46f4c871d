//! Ordered, conflict-free event store.
//!
//! Holds a set of titled time intervals and guarantees that no two of them
//! ever overlap. Conflict detection runs in O(log n): because the stored
//! events are pairwise disjoint and sorted by start, only the two neighbours
//! of a candidate's insertion point can possibly intersect it.
//!
//! # Architecture
//!
//! - [`ordering`] -- The [`EventKey`] total order over `(start, id)`.
//! - [`allocator`] -- The [`IdAllocator`] issuing strictly increasing ids.
//! - [`store`] -- The [`EventStore`]: ordered map plus an id index.
//! - [`conflict`] -- The neighbour-only overlap test.
//! - [`calendar`] -- The [`Calendar`]: one mutex around store and allocator,
//!   making check-then-insert and check-then-delete atomic.
//! - [`audit`] -- Whole-snapshot invariant checks for diagnostics.
//!
//! # Invariant
//!
//! For any two distinct stored events `A` and `B`:
//!
//! ```text
//! !(A.start < B.end && B.start < A.end)
//! ```
//!
//! Touching at a boundary is allowed. A refused create or an unknown delete
//! never mutates the store.
//!
//! # Usage
//!
//! ```
//! use calendar_store::{Calendar, CalendarError};
//! use calendar_types::Instant;
//!
//! let calendar = Calendar::new();
//! let ten = Instant::from_secs(36_000);
//! let eleven = Instant::from_secs(39_600);
//! let noon = Instant::from_secs(43_200);
//!
//! let first = calendar.create_event("planning", ten, eleven);
//! assert!(first.is_ok());
//!
//! // Touching at 11:00 is fine.
//! assert!(calendar.create_event("review", eleven, noon).is_ok());
//!
//! // Overlapping is refused.
//! let clash = calendar.create_event("clash", ten, noon);
//! assert!(matches!(clash, Err(CalendarError::Conflict { .. })));
//! assert_eq!(calendar.snapshot().len(), 2);
//! ```

pub mod allocator;
pub mod audit;
pub mod calendar;
pub mod conflict;
pub mod ordering;
pub mod store;

// Re-export primary types at crate root.
pub use allocator::IdAllocator;
pub use calendar::Calendar;
pub use ordering::EventKey;
pub use store::{EventStore, Neighbors};

use calendar_types::{EventId, Instant, IntervalError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons a create request is refused.
///
/// Every variant leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// `start >= end`. Detected before the guard is taken.
    #[error(transparent)]
    InvalidInterval(#[from] IntervalError),

    /// The candidate overlaps an event already in the store.
    #[error("[{start}, {end}) conflicts with event {existing}")]
    Conflict {
        /// The stored event that blocked the insert.
        existing: EventId,
        /// Candidate start.
        start: Instant,
        /// Candidate end.
        end: Instant,
    },

    /// Every `u64` identifier has been handed out.
    #[error("event identifier space exhausted")]
    IdentifiersExhausted,
}
