//! Strategic nap for aggressive plans with a large shift.

use jiff::SignedDuration;

use crate::error::Result;
use crate::model::{Nap, RecoveryMode};

use super::{DayFrame, PlanContext, add_minutes};

/// Shift at which a nap starts paying for itself.
const MIN_SHIFT_HOURS: f64 = 4.0;

/// Naps are only planned for the first days.
const LAST_NAP_DAY: u32 = 2;

const NAP_AFTER_WAKE_MINUTES: i64 = 7 * 60;
const FIRST_DAY_NAP_MINUTES: i64 = 25;
const NAP_MINUTES: i64 = 20;

/// The nap must finish this long before bed so night sleep is not eroded.
const MIN_HOURS_BEFORE_BED: i64 = 6;

/// A single early-afternoon nap, or `None` when the plan doesn't call for one.
pub fn nap(ctx: &PlanContext, frame: &DayFrame) -> Result<Option<Nap>> {
    if ctx.mode != RecoveryMode::Aggressive
        || ctx.shift.shift_hours < MIN_SHIFT_HOURS
        || frame.day > LAST_NAP_DAY
    {
        return Ok(None);
    }

    let minutes = if frame.day == 1 {
        FIRST_DAY_NAP_MINUTES
    } else {
        NAP_MINUTES
    };
    let start = add_minutes(&frame.wake, NAP_AFTER_WAKE_MINUTES)?;
    let end = add_minutes(&start, minutes)?;

    let before_bed = frame.bed.timestamp().duration_since(end.timestamp());
    if !ctx.after_arrival(&start) || before_bed < SignedDuration::from_hours(MIN_HOURS_BEFORE_BED) {
        return Ok(None);
    }

    Ok(Some(Nap {
        start,
        end,
        rationale: format!(
            "A {minutes}-minute nap takes the edge off sleep pressure; set an alarm so you don't fall into deep sleep."
        ),
    }))
}
