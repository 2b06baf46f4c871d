//! The ordered event container.
//!
//! [`EventStore`] keeps every event in a [`BTreeMap`] keyed by
//! [`EventKey`] (`start`, then `id`), plus an auxiliary `id -> key` index so
//! deletion by identifier is O(log n) instead of a scan.
//!
//! # Design
//!
//! - **Exclusive ownership**: the store owns every [`Event`]; reads hand out
//!   clones.
//! - **No conflict checks here**: [`insert`](EventStore::insert) trusts the
//!   caller. The [`Calendar`](crate::Calendar) runs
//!   [`find_conflict`](crate::conflict::find_conflict) under the same guard
//!   before inserting.
//! - **Index consistency**: `events` and `keys` always hold the same ids.

use std::collections::BTreeMap;

use calendar_types::{Event, EventId, Instant};
use tracing::debug;

use crate::EventKey;

/// The two events adjacent to an insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    /// Last event whose key sorts before the insertion point.
    pub predecessor: Option<&'a Event>,
    /// First event whose start is at or after the insertion point.
    pub successor: Option<&'a Event>,
}

/// Events ordered by `(start, id)` with an id index.
#[derive(Debug, Default)]
pub struct EventStore {
    /// All events, ascending by key.
    events: BTreeMap<EventKey, Event>,
    /// Where each id lives in `events`.
    keys: BTreeMap<EventId, EventKey>,
}

impl EventStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            events: BTreeMap::new(),
            keys: BTreeMap::new(),
        }
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up an event by identifier.
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.keys.get(&id).and_then(|key| self.events.get(key))
    }

    /// Insert an event.
    ///
    /// The caller must already have ruled out conflicts. Identifiers are
    /// unique when they come from the [`IdAllocator`](crate::IdAllocator);
    /// if an id is somehow re-inserted the older event is replaced so the
    /// index never points at a stale key.
    pub fn insert(&mut self, event: Event) {
        let key = EventKey::of(&event);
        if let Some(stale) = self.keys.insert(event.id(), key) {
            self.events.remove(&stale);
        }
        debug!(
            event_id = %event.id(),
            start = %event.start(),
            end = %event.end(),
            "event stored"
        );
        self.events.insert(key, event);
    }

    /// Remove the event with the given id, returning it if it existed.
    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let key = self.keys.remove(&id)?;
        let removed = self.events.remove(&key);
        if removed.is_some() {
            debug!(event_id = %id, "event removed");
        }
        removed
    }

    /// The events on either side of the insertion point for `start`.
    ///
    /// The successor is the first event with `event.start >= start`; the
    /// predecessor is the event immediately before it.
    pub fn neighbors(&self, start: Instant) -> Neighbors<'_> {
        let pivot = EventKey::lower_bound(start);
        Neighbors {
            predecessor: self
                .events
                .range(..pivot)
                .next_back()
                .map(|(_, event)| event),
            successor: self
                .events
                .range(pivot..)
                .next()
                .map(|(_, event)| event),
        }
    }

    /// Every event `e` with `e.start < end && e.end > start`, ascending.
    ///
    /// Starts at the insertion point for `start`, looks one event back (it
    /// may still be running at `start`), then walks forward while events
    /// begin before `end`. Cost is O(log n + k).
    pub fn overlapping(&self, start: Instant, end: Instant) -> Vec<Event> {
        let pivot = EventKey::lower_bound(start);
        let still_running = self
            .events
            .range(..pivot)
            .next_back()
            .map(|(_, event)| event)
            .filter(|event| event.end() > start && event.start() < end);

        let mut found: Vec<Event> = still_running.cloned().into_iter().collect();
        found.extend(
            self.events
                .range(pivot..)
                .map(|(_, event)| event)
                .take_while(|event| event.start() < end)
                .cloned(),
        );

        found
    }

    /// Iterate over all events in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Clone every event, ascending.
    pub fn snapshot(&self) -> Vec<Event> {
        self.iter().cloned().collect()
    }
}
