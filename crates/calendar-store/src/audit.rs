//! Whole-snapshot invariant checks.
//!
//! These run over an ascending snapshot rather than the live store, so they
//! can be used after the guard has been released (for diagnostics and in
//! tests).

use calendar_types::{Event, EventId};

use crate::EventKey;

/// Find two events in `events` that overlap.
///
/// `events` must be ascending by `(start, id)`, as returned by
/// [`Calendar::snapshot`](crate::Calendar::snapshot). In a sorted sequence
/// any overlap implies an overlap between neighbours, so only adjacent
/// pairs are compared.
pub fn find_overlap(events: &[Event]) -> Option<(EventId, EventId)> {
    events.windows(2).find_map(|pair| match pair {
        [a, b] if a.interval().overlaps(&b.interval()) => Some((a.id(), b.id())),
        _ => None,
    })
}

/// Whether `events` are strictly ascending by `(start, id)`.
pub fn is_ordered(events: &[Event]) -> bool {
    events
        .windows(2)
        .all(|pair| matches!(pair, [a, b] if EventKey::of(a) < EventKey::of(b)))
}
