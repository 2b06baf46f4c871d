//! Week bounds and event windows built from zone-local input.

use calendar_types::{Interval, SECONDS_PER_DAY};
use chrono::{Datelike, Days, NaiveDate, NaiveTime};

use crate::{Zone, ZoneError, local_to_utc};

/// Length of a calendar week. Exact, because offsets are fixed.
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// UTC bounds of the Monday-to-Monday week containing `date` in `zone`.
///
/// The week is taken from the *local* date: it starts at local Monday 00:00
/// and ends at the following local Monday 00:00.
pub fn week_bounds(date: NaiveDate, zone: Zone) -> Result<Interval, ZoneError> {
    let back = u64::from(date.weekday().num_days_from_monday());
    let monday = date
        .checked_sub_days(Days::new(back))
        .ok_or(ZoneError::OutOfRange)?;

    let start = local_to_utc(monday, NaiveTime::default(), zone)?;
    let end = start
        .checked_add_secs(SECONDS_PER_WEEK)
        .ok_or(ZoneError::OutOfRange)?;
    Ok(Interval::new(start, end)?)
}

/// The UTC window for an event given as a local date with start/end times.
///
/// If `end_time` is not after `start_time` on the wall clock, the event is
/// taken to end on the next local day. The roll happens exactly once, so the
/// result is always non-empty; equal times mean a 24-hour event.
pub fn event_window(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    zone: Zone,
) -> Result<Interval, ZoneError> {
    let start = local_to_utc(date, start_time, zone)?;

    let end_date = if end_time <= start_time {
        date.succ_opt().ok_or(ZoneError::OutOfRange)?
    } else {
        date
    };
    let end = local_to_utc(end_date, end_time, zone)?;

    Ok(Interval::new(start, end)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use calendar_types::Instant;

    use super::*;
    use crate::{parse_date, parse_time, utc_to_local};

    fn date(text: &str) -> NaiveDate {
        parse_date(text).unwrap()
    }

    fn time(text: &str) -> NaiveTime {
        parse_time(text).unwrap()
    }

    fn shown(instant: Instant, zone: Zone) -> String {
        utc_to_local(instant, zone).unwrap()
    }

    #[test]
    fn week_of_a_wednesday_starts_on_monday() {
        // 2024-03-13 is a Wednesday.
        let week = week_bounds(date("2024-03-13"), Zone::Utc).unwrap();
        assert_eq!(shown(week.start(), Zone::Utc), "2024-03-11 00:00");
        assert_eq!(shown(week.end(), Zone::Utc), "2024-03-18 00:00");
        assert_eq!(week.duration_secs(), SECONDS_PER_WEEK);
    }

    #[test]
    fn monday_and_sunday_share_a_week() {
        let monday = week_bounds(date("2024-03-11"), Zone::Pst);
        let sunday = week_bounds(date("2024-03-17"), Zone::Pst);
        assert!(monday.is_ok());
        assert_eq!(monday, sunday);
    }

    #[test]
    fn week_uses_the_local_date_not_utc() {
        // Monday 00:00 IST is Sunday 18:30 UTC; the week must still start Monday local.
        let week = week_bounds(date("2024-03-11"), Zone::Ist).unwrap();
        assert_eq!(shown(week.start(), Zone::Ist), "2024-03-11 00:00");
        assert_eq!(shown(week.start(), Zone::Utc), "2024-03-10 18:30");
    }

    #[test]
    fn same_day_window() {
        let span =
            event_window(date("2024-03-15"), time("09:00"), time("10:30"), Zone::Utc).unwrap();
        assert_eq!(span.duration_secs(), 90 * 60);
    }

    #[test]
    fn overnight_window_rolls_to_next_day() {
        let span =
            event_window(date("2024-03-15"), time("22:00"), time("02:00"), Zone::Pst).unwrap();
        assert_eq!(shown(span.start(), Zone::Pst), "2024-03-15 22:00");
        assert_eq!(shown(span.end(), Zone::Pst), "2024-03-16 02:00");
    }

    #[test]
    fn overnight_window_across_month_end() {
        let span = event_window(date("2024-01-31"), time("23:30"), time("00:30"), Zone::Ist);
        assert_eq!(span.map(|s| shown(s.end(), Zone::Ist)), Ok("2024-02-01 00:30".to_owned()));
    }

    #[test]
    fn equal_times_mean_a_full_day() {
        let span = event_window(date("2024-03-15"), time("08:00"), time("08:00"), Zone::Utc);
        assert_eq!(span.map(|s| s.duration_secs()), Ok(SECONDS_PER_DAY));
    }
}
