//! Concurrency demonstration: several threads book the identical slot at
//! the same moment. The guard lets exactly one of them through.

use std::sync::Barrier;
use std::thread;

use calendar_store::{Calendar, CalendarError};
use calendar_types::{EventId, Instant, Interval};
use tracing::info;

use crate::config::DemoConfig;

/// What one racing thread got back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOutcome {
    /// 1-based thread number.
    pub thread: usize,
    /// The create result.
    pub result: Result<EventId, CalendarError>,
}

/// Result of one demonstration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// The contested slot.
    pub span: Interval,
    /// One entry per thread, ordered by thread number.
    pub outcomes: Vec<DemoOutcome>,
}

impl DemoReport {
    /// Threads whose create succeeded.
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Threads whose create was refused.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }
}

/// The slot every thread will ask for: `lead_time_secs` after `now`, lasting
/// `duration_secs`. `None` if that falls outside the representable range.
pub fn window(now: Instant, config: &DemoConfig) -> Option<Interval> {
    let start = now.checked_add_secs(config.lead_time_secs)?;
    let end = start.checked_add_secs(config.duration_secs)?;
    Interval::new(start, end).ok()
}

/// Release `threads` threads at once, each trying to book `span`.
pub fn race(calendar: &Calendar, span: Interval, threads: usize) -> DemoReport {
    let barrier = Barrier::new(threads);

    let mut outcomes: Vec<DemoOutcome> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads);
        for thread in 1..=threads {
            let barrier = &barrier;
            handles.push(scope.spawn(move || {
                let title = format!("Thread {thread} Event");
                barrier.wait();
                DemoOutcome {
                    thread,
                    result: calendar.create_in(&title, span),
                }
            }));
        }
        handles
            .into_iter()
            .filter_map(|handle| handle.join().ok())
            .collect()
    });
    outcomes.sort_by_key(|o| o.thread);

    let report = DemoReport { span, outcomes };
    info!(
        threads,
        successes = report.successes(),
        failures = report.failures(),
        "demo race finished"
    );
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(threads: usize) -> DemoConfig {
        DemoConfig {
            threads,
            lead_time_secs: 3600,
            duration_secs: 1800,
        }
    }

    #[test]
    fn window_is_lead_then_duration() {
        let span = window(Instant::from_secs(1_000), &config(2)).unwrap();
        assert_eq!(span.start(), Instant::from_secs(4_600));
        assert_eq!(span.end(), Instant::from_secs(6_400));
    }

    #[test]
    fn window_overflow_is_none() {
        assert_eq!(window(Instant::from_secs(i64::MAX), &config(2)), None);
    }

    #[test]
    fn exactly_one_thread_wins() {
        let calendar = Calendar::new();
        let span = window(Instant::from_secs(0), &config(8)).unwrap();

        let report = race(&calendar, span, 8);

        assert_eq!(report.outcomes.len(), 8);
        assert_eq!(report.successes(), 1);
        assert_eq!(report.failures(), 7);
        assert_eq!(calendar.len(), 1);

        let winner = report
            .outcomes
            .iter()
            .find_map(|o| o.result.as_ref().ok().copied())
            .unwrap();
        for outcome in &report.outcomes {
            if let Err(err) = &outcome.result {
                assert!(matches!(err, CalendarError::Conflict { existing, .. } if *existing == winner));
            }
        }
    }

    #[test]
    fn second_demo_is_fully_refused() {
        let calendar = Calendar::new();
        let span = window(Instant::from_secs(0), &config(2)).unwrap();
        let _ = race(&calendar, span, 2);

        let again = race(&calendar, span, 2);
        assert_eq!(again.successes(), 0);
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn outcomes_are_ordered_by_thread() {
        let calendar = Calendar::new();
        let span = window(Instant::from_secs(0), &config(4)).unwrap();
        let report = race(&calendar, span, 4);
        let order: Vec<usize> = report.outcomes.iter().map(|o| o.thread).collect();
        assert_eq!(order, [1, 2, 3, 4]);
    }
}
