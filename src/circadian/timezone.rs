//! Timezone offset resolution.
//!
//! Lookups go through jiff's bundled tz database, so resolving an offset is
//! an in-process calendar computation with DST rules applied at the
//! requested instant.

use jiff::{Timestamp, tz::TimeZone};

use crate::error::{PlanError, Result};

/// Resolve an IANA identifier.
///
/// Unknown identifiers are an error. There is deliberately no UTC
/// fallback here; direction math must never run on a guessed zone.
pub fn resolve(name: &str) -> Result<TimeZone> {
    TimeZone::get(name).map_err(|_| PlanError::InvalidTimezone(name.to_string()))
}

/// UTC offset of `tz` at `at`, in hours. Fractional for zones like
/// `Asia/Kolkata` (+5.5) or `Asia/Kathmandu` (+5.75).
pub fn offset_hours(tz: &TimeZone, at: Timestamp) -> f64 {
    f64::from(tz.to_offset(at).seconds()) / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn applies_daylight_saving() {
        let london = resolve("Europe/London").unwrap();
        assert_eq!(offset_hours(&london, ts("2024-07-01T12:00:00Z")), 1.0);
        assert_eq!(offset_hours(&london, ts("2024-01-15T12:00:00Z")), 0.0);

        let new_york = resolve("America/New_York").unwrap();
        assert_eq!(offset_hours(&new_york, ts("2024-07-01T12:00:00Z")), -4.0);
        assert_eq!(offset_hours(&new_york, ts("2024-01-15T12:00:00Z")), -5.0);
    }

    #[test]
    fn fractional_offsets() {
        let kolkata = resolve("Asia/Kolkata").unwrap();
        assert_eq!(offset_hours(&kolkata, ts("2024-07-01T12:00:00Z")), 5.5);

        let kathmandu = resolve("Asia/Kathmandu").unwrap();
        assert_eq!(offset_hours(&kathmandu, ts("2024-07-01T12:00:00Z")), 5.75);
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = resolve("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, PlanError::InvalidTimezone(ref name) if name == "Mars/Olympus_Mons"));
    }
}
