//! Neighbour-only conflict detection.
//!
//! Stored events are pairwise disjoint and sorted by start, so any event
//! that overlaps a candidate `[s, e)` must sit right next to the candidate's
//! insertion point:
//!
//! - anything after the successor starts at or after the successor ends,
//!   which is past `e` whenever the successor itself does not conflict;
//! - anything before the predecessor ends at or before the predecessor
//!   starts, which is before `s`.
//!
//! Both neighbours must be checked. A candidate can overlap its predecessor
//! (which started earlier and is still running at `s`) without touching its
//! successor, and vice versa.

use calendar_types::{Event, Interval};

use crate::EventStore;

/// Return a stored event overlapping `candidate`, if there is one.
///
/// Inspects at most two events: O(log n).
pub fn find_conflict<'a>(store: &'a EventStore, candidate: &Interval) -> Option<&'a Event> {
    let neighbors = store.neighbors(candidate.start());
    neighbors
        .successor
        .into_iter()
        .chain(neighbors.predecessor)
        .find(|event| event.overlaps(candidate))
}

/// Whether `candidate` overlaps anything in `store`.
pub fn has_conflict(store: &EventStore, candidate: &Interval) -> bool {
    find_conflict(store, candidate).is_some()
}
