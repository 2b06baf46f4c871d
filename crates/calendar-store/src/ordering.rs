//! Total order over stored events.
//!
//! Events sort by start instant, with the identifier as a tie-breaker. The
//! identifier never takes part in the overlap predicate; it only makes the
//! key unique so two events may share a start in the ordered map.

use calendar_types::{Event, EventId, Instant};

/// Composite `(start, id)` key.
///
/// Field order matters: the derived `Ord` compares `start` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey {
    start: Instant,
    id: EventId,
}

impl EventKey {
    /// Build a key from its parts.
    pub const fn new(start: Instant, id: EventId) -> Self {
        Self { start, id }
    }

    /// The key under which `event` is stored.
    pub const fn of(event: &Event) -> Self {
        Self::new(event.start(), event.id())
    }

    /// The smallest key with the given start.
    ///
    /// Ranging from this key yields the first event whose start is at or
    /// after `start`, i.e. the insertion point for a candidate starting there.
    pub const fn lower_bound(start: Instant) -> Self {
        Self::new(start, EventId::MIN)
    }

    /// Start component.
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Identifier component.
    pub const fn id(&self) -> EventId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(start: i64, id: u64) -> EventKey {
        EventKey::new(Instant::from_secs(start), EventId::new(id))
    }

    #[test]
    fn start_dominates_id() {
        assert!(key(10, 99) < key(20, 1));
    }

    #[test]
    fn id_breaks_ties() {
        assert!(key(10, 1) < key(10, 2));
    }

    #[test]
    fn lower_bound_precedes_every_real_key_at_start() {
        let bound = EventKey::lower_bound(Instant::from_secs(10));
        assert!(bound < key(10, 1));
        assert!(bound > key(9, u64::MAX));
    }
}
