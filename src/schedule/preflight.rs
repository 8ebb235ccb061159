//! Pre-flight taper: start moving sleep toward the destination before
//! leaving.
//!
//! Over the three days before departure, bed and wake times move 30, 60,
//! then 90 minutes in the adaptation direction (never more than the shift
//! itself). Times are in origin-local time.

use jiff::{SignedDuration, ToSpan};

use crate::error::Result;
use crate::model::{Direction, PreflightDay};

use super::{PlanContext, add_minutes, local_time};

/// Taper size by days before departure: 3, 2, 1.
const TAPER_STEPS: [(u8, i64); 3] = [(3, 30), (2, 60), (1, 90)];

/// The three taper days, earliest first. Empty when there is no shift.
pub fn taper(ctx: &PlanContext) -> Result<Vec<PreflightDay>> {
    let direction = ctx.shift.direction;
    if direction == Direction::None {
        return Ok(Vec::new());
    }

    let departure_date = ctx.departure.to_zoned(ctx.origin.clone()).date();
    let cap = shift_minutes_cap(ctx.shift.shift_hours);

    TAPER_STEPS
        .iter()
        .map(|&(days_before, minutes)| -> Result<PreflightDay> {
            let date = departure_date.checked_sub(i64::from(days_before).days())?;
            let shift_minutes = signed_minutes(direction, minutes.min(cap));
            let usual_wake = local_time(&ctx.origin, date, ctx.sleep.normal_wake_time)?;
            let wake_time = add_minutes(&usual_wake, shift_minutes)?;
            let bedtime =
                wake_time.checked_add(SignedDuration::from_hours(ctx.sleep.awake_hours()))?;

            Ok(PreflightDay {
                days_before_departure: days_before,
                date,
                shift_minutes,
                bedtime,
                wake_time,
                advice: advice(direction, shift_minutes.abs()),
            })
        })
        .collect()
}

/// Minutes of taper in the adaptation direction: earlier for east, later
/// for west.
pub fn signed_minutes(direction: Direction, minutes: i64) -> i64 {
    match direction {
        Direction::East => -minutes,
        Direction::West => minutes,
        Direction::None => 0,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn shift_minutes_cap(shift_hours: f64) -> i64 {
    (shift_hours * 60.0).round() as i64
}

fn advice(direction: Direction, minutes: i64) -> String {
    match direction {
        Direction::East => format!(
            "Go to bed and get up {minutes} minutes earlier than usual; get bright light soon after waking."
        ),
        Direction::West => format!(
            "Go to bed and get up {minutes} minutes later than usual; get bright light in the evening."
        ),
        Direction::None => "Keep your usual schedule.".to_string(),
    }
}
