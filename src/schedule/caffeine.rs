//! Caffeine window: when coffee helps and when it starts costing sleep.

use crate::error::Result;
use crate::model::{CaffeineWindow, Direction, RecoveryMode, RecoveryPhase};

use super::{DayFrame, PlanContext, add_minutes};

/// Let adenosine clear before the first cup.
const AFTER_WAKE_MINUTES: i64 = 90;

const CONSERVATIVE_CUTOFF_HOURS: i64 = 8;
const AGGRESSIVE_CUTOFF_HOURS: i64 = 6;

/// Eastward sleep onset is already hard in the acute phase.
const ACUTE_EAST_EXTRA_HOURS: i64 = 1;

/// The caffeine window for `frame`, or `None` if it is empty.
pub fn window(ctx: &PlanContext, frame: &DayFrame) -> Result<Option<CaffeineWindow>> {
    let mut cutoff_hours = match ctx.mode {
        RecoveryMode::Conservative => CONSERVATIVE_CUTOFF_HOURS,
        RecoveryMode::Aggressive => AGGRESSIVE_CUTOFF_HOURS,
    };
    if ctx.shift.direction == Direction::East && frame.phase == RecoveryPhase::Acute {
        cutoff_hours += ACUTE_EAST_EXTRA_HOURS;
    }

    let allowed_from = add_minutes(&frame.wake, AFTER_WAKE_MINUTES)?;
    let cutoff = add_minutes(&frame.bed, -cutoff_hours * 60)?;
    let Some((allowed_from, cutoff)) = ctx.clip_to_arrival(allowed_from, cutoff, 1) else {
        return Ok(None);
    };

    Ok(Some(CaffeineWindow {
        allowed_from,
        cutoff,
        rationale: format!(
            "Wait 90 minutes after waking for caffeine and stop {cutoff_hours} hours before bed."
        ),
    }))
}
