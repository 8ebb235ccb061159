//! Wake and bed times for each recovery day.
//!
//! The usual wake time is moved part of the way toward the body clock
//! while shift remains: later when heading east (the body still thinks it
//! is earlier), earlier when heading west. The adjustment shrinks as the
//! body catches up and is capped so sleep never strays far from the
//! destination schedule.

use jiff::{SignedDuration, ToSpan, Zoned, civil::Date};

use crate::circadian::body_clock::hours_to_duration;
use crate::error::Result;
use crate::model::{RecoveryMode, RecoveryPhase, SleepBlock};

use super::{PlanContext, local_time};

/// Largest wake-time accommodation, in hours.
const CONSERVATIVE_ACCOMMODATION: f64 = 2.0;
const AGGRESSIVE_ACCOMMODATION: f64 = 1.0;

/// The skeleton of one recovery day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayFrame {
    pub day: u32,
    pub date: Date,
    pub phase: RecoveryPhase,
    pub wake: Zoned,
    pub bed: Zoned,
}

/// Compute the date, phase, and wake/bed times of `day`.
pub fn frame(ctx: &PlanContext, day: u32) -> Result<DayFrame> {
    let date = ctx
        .arrival_date()
        .checked_add(i64::from(day.saturating_sub(1)).days())?;

    let cap = match ctx.mode {
        RecoveryMode::Conservative => CONSERVATIVE_ACCOMMODATION,
        RecoveryMode::Aggressive => AGGRESSIVE_ACCOMMODATION,
    };
    let accommodation = ctx.clock.remaining_hours(day).min(cap);
    let offset = ctx.shift.direction.sign() * accommodation;

    let wake = local_time(&ctx.destination, date, ctx.sleep.normal_wake_time)?
        .checked_add(hours_to_duration(offset))?;
    let bed = wake.checked_add(SignedDuration::from_hours(ctx.sleep.awake_hours()))?;

    Ok(DayFrame {
        day,
        date,
        phase: RecoveryPhase::for_day(day),
        wake,
        bed,
    })
}

/// The night following `frame`.
pub fn sleep_block(ctx: &PlanContext, frame: &DayFrame) -> Result<SleepBlock> {
    let asleep_hours = 24 - ctx.sleep.awake_hours();
    let end = frame
        .bed
        .checked_add(SignedDuration::from_hours(asleep_hours))?;
    Ok(SleepBlock {
        start: frame.bed.clone(),
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::SleepPreferences;
    use crate::schedule::testing::{london_to_new_york, taipei_to_vancouver};

    #[test]
    fn westward_wakes_earlier_on_day_one() {
        let ctx = london_to_new_york();
        let frame = frame(&ctx, 1).unwrap();
        assert_eq!(frame.phase, RecoveryPhase::Acute);
        // Five hours remain, capped at two.
        assert_eq!(frame.wake.hour(), 4);
        assert_eq!(frame.bed.hour(), 20);
    }

    #[test]
    fn eastward_wakes_later_until_caught_up() {
        let ctx = taipei_to_vancouver();
        assert_eq!(ctx.recovery_days, 9);

        let day1 = frame(&ctx, 1).unwrap();
        assert_eq!(day1.wake.hour(), 8);
        assert_eq!(day1.bed.date(), jiff::civil::date(2024, 6, 2));
        assert_eq!(day1.bed.hour(), 0);

        // Day 9: one hour remains.
        let day9 = frame(&ctx, 9).unwrap();
        assert_eq!(day9.date, jiff::civil::date(2024, 6, 9));
        assert_eq!(day9.wake.hour(), 7);
        assert_eq!(day9.phase, RecoveryPhase::Maintenance);
    }

    #[test]
    fn aggressive_mode_holds_closer_to_destination() {
        let mut ctx = taipei_to_vancouver();
        ctx.mode = RecoveryMode::Aggressive;
        assert_eq!(frame(&ctx, 1).unwrap().wake.hour(), 7);
    }

    #[test]
    fn sleep_block_covers_the_night() {
        let mut ctx = london_to_new_york();
        ctx.sleep = SleepPreferences {
            normal_bedtime: 23,
            normal_wake_time: 7,
        };
        let frame = frame(&ctx, 3).unwrap();
        let block = sleep_block(&ctx, &frame).unwrap();
        assert_eq!(block.start, frame.bed);
        assert_eq!(
            block.end.timestamp().duration_since(block.start.timestamp()),
            SignedDuration::from_hours(8)
        );
    }
}
