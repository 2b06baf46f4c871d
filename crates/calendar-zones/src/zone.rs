//! The supported fixed-offset zones.

use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::ZoneError;

/// A recognized time zone with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
    /// Coordinated Universal Time, +00:00.
    Utc,
    /// India Standard Time, +05:30.
    Ist,
    /// Pacific Standard Time, -08:00. No daylight saving.
    Pst,
}

impl Zone {
    /// Every supported zone, in display order.
    pub const ALL: [Self; 3] = [Self::Utc, Self::Ist, Self::Pst];

    /// The canonical name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utc => "UTC",
            Self::Ist => "IST",
            Self::Pst => "PST",
        }
    }

    /// Seconds east of UTC (local = UTC + offset).
    pub const fn offset_seconds(self) -> i32 {
        match self {
            Self::Utc => 0,
            Self::Ist => 19_800,
            Self::Pst => -28_800,
        }
    }

    /// The offset as a chrono [`FixedOffset`].
    pub fn offset(self) -> FixedOffset {
        // All offsets above are well inside chrono's +/-24h limit.
        FixedOffset::east_opt(self.offset_seconds()).unwrap_or_else(|| Utc.fix())
    }

    /// Comma-separated list of accepted names, for error messages.
    pub fn supported_names() -> String {
        Self::ALL.map(Self::name).join(", ")
    }
}

impl core::fmt::Display for Zone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = ZoneError;

    /// Names are matched exactly: `"UTC"`, `"IST"`, `"PST"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|zone| zone.name() == s)
            .ok_or_else(|| ZoneError::UnsupportedZone(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("UTC".parse::<Zone>(), Ok(Zone::Utc));
        assert_eq!("IST".parse::<Zone>(), Ok(Zone::Ist));
        assert_eq!("PST".parse::<Zone>(), Ok(Zone::Pst));
    }

    #[test]
    fn rejects_unknown_and_lowercase() {
        assert_eq!(
            "EST".parse::<Zone>(),
            Err(ZoneError::UnsupportedZone("EST".to_owned()))
        );
        assert!("utc".parse::<Zone>().is_err());
    }

    #[test]
    fn offsets_match_fixed_values() {
        assert_eq!(Zone::Ist.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(Zone::Pst.offset().local_minus_utc(), -8 * 3600);
        assert_eq!(Zone::Utc.offset().local_minus_utc(), 0);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for zone in Zone::ALL {
            assert_eq!(zone.to_string().parse::<Zone>(), Ok(zone));
        }
    }

    #[test]
    fn serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&Zone::Ist).ok().as_deref(), Some("\"IST\""));
        let parsed: Result<Zone, _> = serde_json::from_str("\"PST\"");
        assert_eq!(parsed.ok(), Some(Zone::Pst));
    }

    #[test]
    fn error_message_lists_supported_zones() {
        let message = ZoneError::UnsupportedZone("CET".to_owned()).to_string();
        assert!(message.contains("UTC, IST, PST"));
    }
}
