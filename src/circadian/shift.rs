//! Shift and direction: the shorter circadian path between two zones.

use jiff::{Timestamp, tz::TimeZone};

use crate::model::{Direction, TimezoneShift};

use super::timezone::offset_hours;

/// Derive the shorter path from two UTC offsets (hours).
///
/// A raw difference above 12 hours wraps the other way around the clock
/// face, so the direction flips: `+15` becomes a 9-hour westward shift.
/// Differences beyond a full day (only possible between the Line Islands
/// and zones at -11 or -12) are reduced modulo 24 first.
pub fn shift_from_offsets(origin_offset: f64, destination_offset: f64) -> TimezoneShift {
    let raw = destination_offset - origin_offset;
    let aligned = TimezoneShift {
        raw_offset_hours: raw,
        shift_hours: 0.0,
        direction: Direction::None,
    };
    if raw.abs() < f64::EPSILON {
        return aligned;
    }

    let naive = if raw > 0.0 {
        Direction::East
    } else {
        Direction::West
    };
    let magnitude = raw.abs() % 24.0;
    let (shift_hours, direction) = if magnitude > 12.0 {
        (24.0 - magnitude, naive.flipped())
    } else {
        (magnitude, naive)
    };

    if shift_hours < f64::EPSILON {
        return aligned;
    }

    TimezoneShift {
        raw_offset_hours: raw,
        shift_hours,
        direction,
    }
}

/// Resolve both offsets at `at` and derive the shorter path.
pub fn shift_between(origin: &TimeZone, destination: &TimeZone, at: Timestamp) -> TimezoneShift {
    shift_from_offsets(offset_hours(origin, at), offset_hours(destination, at))
}
