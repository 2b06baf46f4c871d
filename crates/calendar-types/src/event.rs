//! The stored event record.

use serde::Serialize;

use crate::{EventId, Instant, Interval};

/// A titled, non-empty span of time held by the store.
///
/// Events are created only by the store after a successful conflict check.
/// Apart from being deleted they never change: there is no in-place edit.
/// Callers always receive clones, never references into the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Event {
    id: EventId,
    title: String,
    start: Instant,
    end: Instant,
}

impl Event {
    /// Assemble an event from an allocated id and a validated interval.
    pub fn new(id: EventId, title: impl Into<String>, interval: Interval) -> Self {
        Self {
            id,
            title: title.into(),
            start: interval.start(),
            end: interval.end(),
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Free-form title. Never consulted for ordering or conflicts.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Inclusive start instant.
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Exclusive end instant.
    pub const fn end(&self) -> Instant {
        self.end
    }

    /// The `[start, end)` span of this event.
    pub const fn interval(&self) -> Interval {
        // `start < end` was checked when the interval was built.
        Interval::from_parts_unchecked(self.start, self.end)
    }

    /// Whether this event shares at least one instant with `span`.
    pub const fn overlaps(&self, span: &Interval) -> bool {
        self.interval().overlaps(span)
    }
}
