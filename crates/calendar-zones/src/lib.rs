//! Fixed-offset time-zone conversion for the calendar.
//!
//! The event store only ever sees UTC [`Instant`]s. This crate sits between
//! human input and the store: it turns `(date, time-of-day, zone)` triples
//! into instants, renders instants back as zone-local text, and computes the
//! UTC bounds of a calendar week.
//!
//! Only three zones are recognized, each with a fixed offset and no
//! daylight-saving rules:
//!
//! | Zone | Offset |
//! |------|--------|
//! | `UTC` | +00:00 |
//! | `IST` | +05:30 |
//! | `PST` | -08:00 |
//!
//! # Usage
//!
//! ```
//! use calendar_zones::{event_window, parse_date, parse_time, utc_to_local, Zone};
//!
//! let date = parse_date("2024-03-15").ok();
//! let start = parse_time("23:00").ok();
//! let end = parse_time("01:00").ok();
//! let (Some(date), Some(start), Some(end)) = (date, start, end) else {
//!     return;
//! };
//!
//! // End before start rolls over to the next local day.
//! let span = event_window(date, start, end, Zone::Ist).ok();
//! assert_eq!(span.map(|s| s.duration_secs()), Some(2 * 3600));
//!
//! let shown = span.and_then(|s| utc_to_local(s.end(), Zone::Ist).ok());
//! assert_eq!(shown.as_deref(), Some("2024-03-16 01:00"));
//! ```
//!
//! [`Instant`]: calendar_types::Instant

pub mod convert;
pub mod window;
pub mod zone;

pub use convert::{local_to_utc, parse_date, parse_time, utc_to_local};
pub use window::{event_window, week_bounds};
pub use zone::Zone;

use calendar_types::IntervalError;

/// Errors from parsing or converting zone-local input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneError {
    /// The zone name is not one of the supported fixed-offset zones.
    #[error("unsupported time zone {0:?} (supported: {supported})", supported = Zone::supported_names())]
    UnsupportedZone(String),

    /// Date text is not a real `YYYY-MM-DD` date on or after 1970-01-01.
    #[error("malformed date {0:?}: expected YYYY-MM-DD")]
    MalformedDate(String),

    /// Time text is not a valid `HH:MM` time of day.
    #[error("malformed time {0:?}: expected HH:MM")]
    MalformedTime(String),

    /// The result does not fit in the representable date/time range.
    #[error("date/time out of range")]
    OutOfRange,

    /// The computed window is empty or inverted.
    #[error(transparent)]
    Interval(#[from] IntervalError),
}
