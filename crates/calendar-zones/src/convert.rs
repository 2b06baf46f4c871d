//! Text parsing and zone-local <-> UTC conversion.

use calendar_types::Instant;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone};

use crate::{Zone, ZoneError};

/// Earliest accepted calendar year.
const MIN_YEAR: i32 = 1970;

/// Display format for zone-local timestamps.
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a strict `YYYY-MM-DD` date on or after 1970-01-01.
///
/// Rejects anything that is not exactly ten characters with zero-padded
/// fields, and impossible dates such as `2023-02-30`.
pub fn parse_date(text: &str) -> Result<NaiveDate, ZoneError> {
    let malformed = || ZoneError::MalformedDate(text.to_owned());

    if !has_shape(text, "dddd-dd-dd") {
        return Err(malformed());
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_err| malformed())?;
    if date.year() < MIN_YEAR {
        return Err(malformed());
    }
    Ok(date)
}

/// Parse a strict 24-hour `HH:MM` time of day.
pub fn parse_time(text: &str) -> Result<NaiveTime, ZoneError> {
    let malformed = || ZoneError::MalformedTime(text.to_owned());

    if !has_shape(text, "dd:dd") {
        return Err(malformed());
    }
    NaiveTime::parse_from_str(text, "%H:%M").map_err(|_err| malformed())
}

/// The UTC instant of wall-clock `date time` in `zone`.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, zone: Zone) -> Result<Instant, ZoneError> {
    zone.offset()
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|local| Instant::from_secs(local.timestamp()))
        .ok_or(ZoneError::OutOfRange)
}

/// Render `instant` as `YYYY-MM-DD HH:MM` wall-clock time in `zone`.
pub fn utc_to_local(instant: Instant, zone: Zone) -> Result<String, ZoneError> {
    let utc = DateTime::from_timestamp(instant.as_secs(), 0).ok_or(ZoneError::OutOfRange)?;
    Ok(utc.with_timezone(&zone.offset()).format(LOCAL_FORMAT).to_string())
}

/// Whether `text` matches `pattern`, where `d` means an ASCII digit and any
/// other pattern byte must match literally.
fn has_shape(text: &str, pattern: &str) -> bool {
    text.len() == pattern.len()
        && text
            .bytes()
            .zip(pattern.bytes())
            .all(|(c, p)| if p == b'd' { c.is_ascii_digit() } else { c == p })
}
