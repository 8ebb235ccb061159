//! Recovery-duration estimation.
//!
//! Two policies, never blended:
//!
//! - **Conservative**: passive-adaptation rates from the literature
//!   (roughly 0.9 days per hour eastward, 0.6 westward), with minimum-day
//!   floors and a ceiling of 1.2 days per hour of shift.
//! - **Aggressive**: a fixed three-bucket table for intensive protocols,
//!   never more than three days.

use crate::model::{Direction, RecoveryMode};

/// Days per hour of shift, conservative policy.
const EAST_RATE: f64 = 0.9;
const WEST_RATE: f64 = 0.6;
const NEUTRAL_RATE: f64 = 0.75;

/// Recovery may never exceed this many days per hour of shift.
const CEILING_RATE: f64 = 1.2;

/// Below this shift no recovery days are planned.
const MIN_SHIFT_HOURS: f64 = 1.0;

/// Estimate the number of recovery days for a shift.
///
/// Returns `0` only when `shift_hours < 1`.
pub fn estimate_recovery_days(shift_hours: f64, direction: Direction, mode: RecoveryMode) -> u32 {
    if shift_hours < MIN_SHIFT_HOURS {
        return 0;
    }
    match mode {
        RecoveryMode::Conservative => conservative(shift_hours, direction),
        RecoveryMode::Aggressive => aggressive(shift_hours),
    }
}

/// The most days the conservative policy may ever return: `ceil(shift × 1.2)`.
pub fn recovery_ceiling(shift_hours: f64) -> u32 {
    whole_days(shift_hours * CEILING_RATE)
}

fn conservative(shift_hours: f64, direction: Direction) -> u32 {
    let rate = match direction {
        Direction::East => EAST_RATE,
        Direction::West => WEST_RATE,
        Direction::None => NEUTRAL_RATE,
    };
    let floor = match shift_hours {
        h if h < 2.0 => 1,
        h if h < 3.0 => 2,
        _ => 3,
    };

    whole_days(shift_hours * rate)
        .max(floor)
        .min(recovery_ceiling(shift_hours))
}

fn aggressive(shift_hours: f64) -> u32 {
    match shift_hours {
        h if h < 2.0 => 1,
        h if h < 4.0 => 2,
        _ => 3,
    }
}

/// Ceiling to whole days, tolerant of float noise such as `5 × 0.6`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_days(days: f64) -> u32 {
    (days - 1e-9).ceil().max(0.0) as u32
}
