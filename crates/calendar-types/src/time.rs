//! Absolute instants and half-open intervals.
//!
//! All times in the store are UTC seconds since the Unix epoch. Zone names,
//! offsets, and wall-clock strings never reach this layer.

use serde::{Deserialize, Serialize};

/// Number of seconds in one civil day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// An absolute point in time, in whole seconds since 1970-01-01T00:00:00Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    /// Build an instant from seconds since the epoch.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Seconds since the epoch.
    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Shift the instant by `secs` (negative moves backwards).
    ///
    /// Returns `None` on overflow.
    pub const fn checked_add_secs(self, secs: i64) -> Option<Self> {
        match self.0.checked_add(secs) {
            Some(shifted) => Some(Self(shifted)),
            None => None,
        }
    }
}

impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Instant {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

/// Errors raised when constructing an [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    /// The interval would be empty or inverted.
    #[error("interval start {start} must be before end {end}")]
    StartNotBeforeEnd {
        /// Requested start.
        start: Instant,
        /// Requested end.
        end: Instant,
    },
}

/// A non-empty half-open span `[start, end)`.
///
/// # Invariants
///
/// `start < end` always holds; the constructor rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    start: Instant,
    end: Instant,
}

impl Interval {
    /// Create an interval, rejecting `start >= end`.
    pub const fn new(start: Instant, end: Instant) -> Result<Self, IntervalError> {
        if start.0 < end.0 {
            Ok(Self { start, end })
        } else {
            Err(IntervalError::StartNotBeforeEnd { start, end })
        }
    }

    /// Rebuild an interval whose bounds were already validated.
    pub(crate) const fn from_parts_unchecked(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    /// Inclusive start.
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Exclusive end.
    pub const fn end(&self) -> Instant {
        self.end
    }

    /// Length of the interval in seconds.
    ///
    /// Saturates for spans wider than `i64::MAX`.
    pub const fn duration_secs(&self) -> i64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Whether the two spans share at least one instant.
    ///
    /// Touching at a boundary (`self.end == other.start`) is not an overlap.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start.0 < other.end.0 && other.start.0 < self.end.0
    }
}
