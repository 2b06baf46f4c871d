//! Monotonic identifier allocation.

use calendar_types::EventId;

/// Hands out [`EventId`]s starting at 1, strictly increasing, never reused.
///
/// Not independently thread-safe: allocation takes `&mut self`, so in the
/// [`Calendar`](crate::Calendar) it is only reachable while the guard is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    /// The id the next call returns; `None` once `u64::MAX` has been issued.
    next: Option<EventId>,
}

impl IdAllocator {
    /// A fresh allocator whose first id is [`EventId::FIRST`].
    pub const fn new() -> Self {
        Self {
            next: Some(EventId::FIRST),
        }
    }

    /// Issue the next identifier.
    ///
    /// Returns `None` only after the whole `u64` range has been spent.
    pub const fn allocate(&mut self) -> Option<EventId> {
        let Some(id) = self.next else {
            return None;
        };
        self.next = id.checked_next();
        Some(id)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), Some(EventId::new(1)));
    }

    #[test]
    fn strictly_increasing() {
        let mut ids = IdAllocator::new();
        let issued: Vec<EventId> = (0..100).filter_map(|_| ids.allocate()).collect();
        assert_eq!(issued.len(), 100);
        assert!(issued.windows(2).all(|w| matches!(w, [a, b] if a < b)));
    }

    #[test]
    fn exhaustion_is_reported_not_wrapped() {
        let mut ids = IdAllocator {
            next: Some(EventId::new(u64::MAX)),
        };
        assert_eq!(ids.allocate(), Some(EventId::new(u64::MAX)));
        assert_eq!(ids.allocate(), None);
        assert_eq!(ids.allocate(), None);
    }
}
