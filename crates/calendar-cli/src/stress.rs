//! Randomized multi-threaded workload against a scratch calendar, followed
//! by a full invariant audit of what was stored.

use std::sync::Barrier;
use std::thread;

use calendar_store::Calendar;
use calendar_store::audit::{find_overlap, is_ordered};
use calendar_types::{EventId, Instant, Interval};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::StressConfig;

/// Totals from one stress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressReport {
    /// Create attempts made across all threads.
    pub attempts: usize,
    /// Attempts that were booked.
    pub created: usize,
    /// Attempts that were refused.
    pub refused: usize,
    /// Events in the calendar afterwards.
    pub stored: usize,
    /// First overlapping pair found by the audit. Always `None` unless the
    /// store is broken.
    pub overlap: Option<(EventId, EventId)>,
    /// Whether the snapshot came back in ascending order.
    pub ordered: bool,
}

impl StressReport {
    /// Whether the audit found nothing wrong.
    pub const fn is_clean(&self) -> bool {
        self.overlap.is_none() && self.ordered && self.created == self.stored
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    created: usize,
    refused: usize,
}

/// Run the workload described by `config` on a fresh calendar and audit it.
pub fn run(config: &StressConfig) -> StressReport {
    let calendar = Calendar::new();
    let barrier = Barrier::new(config.threads);

    let tallies: Vec<Tally> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(config.threads);
        let mut seed = config.seed;
        for _ in 0..config.threads {
            let (calendar, barrier) = (&calendar, &barrier);
            let worker_seed = seed;
            handles.push(scope.spawn(move || {
                barrier.wait();
                worker(calendar, config, worker_seed)
            }));
            seed = seed.wrapping_add(1);
        }
        handles
            .into_iter()
            .filter_map(|handle| handle.join().ok())
            .collect()
    });

    let (created, refused) = tallies.iter().fold((0usize, 0usize), |(c, r), t| {
        (c.saturating_add(t.created), r.saturating_add(t.refused))
    });

    let snapshot = calendar.snapshot();
    let report = StressReport {
        attempts: created.saturating_add(refused),
        created,
        refused,
        stored: snapshot.len(),
        overlap: find_overlap(&snapshot),
        ordered: is_ordered(&snapshot),
    };

    if report.is_clean() {
        info!(
            attempts = report.attempts,
            created = report.created,
            refused = report.refused,
            "stress run passed audit"
        );
    } else {
        warn!(
            overlap = ?report.overlap,
            ordered = report.ordered,
            created = report.created,
            stored = report.stored,
            "stress run FAILED audit"
        );
    }
    report
}

fn worker(calendar: &Calendar, config: &StressConfig, seed: u64) -> Tally {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally::default();

    for _ in 0..config.attempts_per_thread {
        let start = rng.random_range(0..config.horizon_secs);
        let length = rng.random_range(1..=config.max_duration_secs);
        let booked = random_span(start, length)
            .is_some_and(|span| calendar.create_in("stress", span).is_ok());

        if booked {
            tally.created = tally.created.saturating_add(1);
        } else {
            tally.refused = tally.refused.saturating_add(1);
        }
    }
    tally
}

fn random_span(start: i64, length: i64) -> Option<Interval> {
    let start = Instant::from_secs(start);
    let end = start.checked_add_secs(length)?;
    Interval::new(start, end).ok()
}
