//! The guarded calendar: one lock around the store and the allocator.
//!
//! Every public operation takes the same [`Mutex`] for its whole duration.
//! That makes "check for a conflict, then insert" a single atomic step: two
//! threads racing to book the same slot are serialized, exactly one wins,
//! and the other sees the winner's event and is refused.
//!
//! Critical sections are pure in-memory work bounded by O(log n + k). No
//! I/O, no callbacks, and no nested locking happen while the guard is held.

use std::sync::{Mutex, MutexGuard, PoisonError};

use calendar_types::{Event, EventId, Instant, Interval};
use tracing::debug;

use crate::conflict::find_conflict;
use crate::{CalendarError, EventStore, IdAllocator};

/// State shared behind the guard.
#[derive(Debug, Default)]
struct CalendarState {
    store: EventStore,
    ids: IdAllocator,
}

/// Thread-safe calendar of non-overlapping events.
///
/// Safe to share via `Arc<Calendar>` or scoped borrows.
#[derive(Debug, Default)]
pub struct Calendar {
    state: Mutex<CalendarState>,
}

impl Calendar {
    /// Create an empty calendar. The first event gets id 1.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(CalendarState {
                store: EventStore::new(),
                ids: IdAllocator::new(),
            }),
        }
    }

    /// Book `[start, end)` under `title`.
    ///
    /// Runs validate-then-commit atomically:
    ///
    /// 1. reject `start >= end` without touching the guard;
    /// 2. take the guard;
    /// 3. look for a conflicting neighbour;
    /// 4. on conflict, release and refuse;
    /// 5. otherwise allocate an id, insert, release, and return the id.
    ///
    /// A refused request never mutates the store.
    pub fn create_event(
        &self,
        title: &str,
        start: Instant,
        end: Instant,
    ) -> Result<EventId, CalendarError> {
        let span = Interval::new(start, end)?;
        self.create_in(title, span)
    }

    /// Book an already-validated interval. See [`create_event`](Self::create_event).
    pub fn create_in(&self, title: &str, span: Interval) -> Result<EventId, CalendarError> {
        let mut state = self.lock();

        if let Some(existing) = find_conflict(&state.store, &span).map(Event::id) {
            debug!(
                existing = %existing,
                start = %span.start(),
                end = %span.end(),
                "create refused: conflict"
            );
            return Err(CalendarError::Conflict {
                existing,
                start: span.start(),
                end: span.end(),
            });
        }

        let id = state
            .ids
            .allocate()
            .ok_or(CalendarError::IdentifiersExhausted)?;
        state.store.insert(Event::new(id, title, span));

        Ok(id)
    }

    /// Delete the event with `id`. Returns whether anything was removed.
    pub fn delete_event(&self, id: EventId) -> bool {
        let removed = self.lock().store.remove(id).is_some();
        if !removed {
            debug!(event_id = %id, "delete ignored: unknown id");
        }
        removed
    }

    /// Events overlapping `[start, end)`, ascending by start.
    ///
    /// Includes an event that began before `start` but is still running at
    /// `start`.
    pub fn events_in_range(&self, start: Instant, end: Instant) -> Vec<Event> {
        self.lock().store.overlapping(start, end)
    }

    /// Events overlapping `span`, ascending by start.
    pub fn events_in(&self, span: &Interval) -> Vec<Event> {
        self.events_in_range(span.start(), span.end())
    }

    /// Every stored event, ascending.
    pub fn snapshot(&self) -> Vec<Event> {
        self.lock().store.snapshot()
    }

    /// Copy of the event with `id`, if stored.
    pub fn get(&self, id: EventId) -> Option<Event> {
        self.lock().store.get(id).cloned()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.lock().store.len()
    }

    /// Whether no events are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().store.is_empty()
    }

    /// Acquire the guard.
    ///
    /// Mutations are never left half-applied, so state behind a poisoned
    /// lock is still consistent and is used as-is.
    fn lock(&self) -> MutexGuard<'_, CalendarState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
