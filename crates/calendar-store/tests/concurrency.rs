//! Concurrency tests for the guarded calendar.
//!
//! Threads are released together through a [`Barrier`] so their create
//! calls genuinely contend for the guard.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;

use calendar_store::audit::{find_overlap, is_ordered};
use calendar_store::{Calendar, CalendarError};
use calendar_types::{EventId, Instant};

#[test]
fn racing_identical_creates_have_exactly_one_winner() {
    for _ in 0..50 {
        let calendar = Calendar::new();
        let barrier = Barrier::new(2);
        let start = Instant::from_secs(1_700_000_000);
        let end = Instant::from_secs(1_700_001_800);

        let results: Vec<Result<EventId, CalendarError>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|n| {
                    let calendar = &calendar;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        calendar.create_event(&format!("thread {n}"), start, end)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let wins = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(CalendarError::Conflict { .. })))
            .count();
        assert_eq!(wins, 1);
        assert_eq!(conflicts, 1);
        assert_eq!(calendar.len(), 1);
    }
}

#[test]
fn many_threads_one_slot() {
    const THREADS: usize = 16;
    let calendar = Arc::new(Calendar::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|n| {
            let calendar = Arc::clone(&calendar);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Every candidate covers 10:00-10:30 in some form.
                let offset = i64::try_from(n).unwrap() * 60;
                calendar
                    .create_event(
                        "contender",
                        Instant::from_secs(36_000 - offset),
                        Instant::from_secs(37_800 + offset),
                    )
                    .is_ok()
            })
        })
        .collect();

    let wins = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(wins, 1);
    assert_eq!(calendar.len(), 1);
}

#[test]
fn concurrent_mixed_workload_preserves_invariant() {
    const THREADS: i64 = 8;
    const ATTEMPTS: i64 = 200;
    let calendar = Calendar::new();

    let issued: Vec<EventId> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let calendar = &calendar;
                scope.spawn(move || {
                    let mut mine = Vec::new();
                    for i in 0..ATTEMPTS {
                        // Deterministic but interleaved slots with heavy contention.
                        let start = ((i * 7 + t * 13) % 150) * 60;
                        let len = ((i + t) % 5 + 1) * 60;
                        if let Ok(id) = calendar.create_event(
                            "load",
                            Instant::from_secs(start),
                            Instant::from_secs(start + len),
                        ) {
                            mine.push(id);
                            if i % 3 == 0 {
                                assert!(calendar.delete_event(id));
                            }
                        }
                        let _ = calendar.events_in_range(
                            Instant::from_secs(start),
                            Instant::from_secs(start + 600),
                        );
                    }
                    mine
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let snapshot = calendar.snapshot();
    assert_eq!(find_overlap(&snapshot), None);
    assert!(is_ordered(&snapshot));

    let unique: BTreeSet<EventId> = issued.iter().copied().collect();
    assert_eq!(unique.len(), issued.len(), "identifiers must never repeat");
}

#[test]
fn readers_never_observe_overlap() {
    let calendar = Calendar::new();
    let barrier = Barrier::new(3);

    thread::scope(|scope| {
        for writer in 0..2_i64 {
            let calendar = &calendar;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                for slot in 0..300_i64 {
                    let start = slot * 30 + writer * 15;
                    let _ = calendar.create_event(
                        "w",
                        Instant::from_secs(start),
                        Instant::from_secs(start + 30),
                    );
                }
            });
        }

        let calendar = &calendar;
        let barrier = &barrier;
        scope.spawn(move || {
            barrier.wait();
            for _ in 0..300 {
                let snapshot = calendar.snapshot();
                assert_eq!(find_overlap(&snapshot), None);
            }
        });
    });
}
