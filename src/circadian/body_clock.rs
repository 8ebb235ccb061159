//! Body-clock drift: how far the internal clock has moved toward
//! destination time on a given recovery day.
//!
//! Progress is linear across the recovery window. On day 1 the body is
//! still on origin time exactly; each following day closes another
//! `shift / recovery_days` hours of the gap.

use jiff::{SignedDuration, Zoned, civil::DateTime};

use crate::error::Result;
use crate::model::{Direction, TimezoneShift};

/// The fixed drift parameters of one plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyClock {
    pub shift_hours: f64,
    pub recovery_days: u32,
    pub direction: Direction,
}

/// Where the internal clock stands at one destination-local moment.
///
/// Recomputed on every query; never stored in a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyClockEstimate {
    /// Wall-clock time the body "believes" it is.
    pub internal_time: DateTime,
    pub hours_shifted_so_far: f64,
    pub remaining_shift_hours: f64,
}

impl BodyClockEstimate {
    /// Hour of the internal day as a fraction in `[0, 24)`.
    pub fn internal_hour(&self) -> f64 {
        f64::from(self.internal_time.hour()) + f64::from(self.internal_time.minute()) / 60.0
    }
}

impl BodyClock {
    pub fn new(shift: &TimezoneShift, recovery_days: u32) -> Self {
        Self {
            shift_hours: shift.shift_hours,
            recovery_days,
            direction: shift.direction,
        }
    }

    /// Fraction of the shift completed at the start of `day` (1-based).
    pub fn progress(&self, day: u32) -> f64 {
        if self.recovery_days == 0 {
            return 1.0;
        }
        let elapsed = f64::from(day.saturating_sub(1));
        (elapsed / f64::from(self.recovery_days)).min(1.0)
    }

    pub fn hours_shifted(&self, day: u32) -> f64 {
        self.progress(day) * self.shift_hours
    }

    pub fn remaining_hours(&self, day: u32) -> f64 {
        self.shift_hours - self.hours_shifted(day)
    }

    /// Estimate the internal clock at `local` on `day`.
    ///
    /// The body lags the destination by whatever shift remains: behind it
    /// when heading east, ahead of it when heading west.
    pub fn estimate(&self, local: &Zoned, day: u32) -> Result<BodyClockEstimate> {
        let hours_shifted = self.hours_shifted(day);
        let remaining = self.shift_hours - hours_shifted;
        let lag = -self.direction.sign() * remaining;
        let internal_time = local.datetime().checked_add(hours_to_duration(lag))?;

        Ok(BodyClockEstimate {
            internal_time,
            hours_shifted_so_far: hours_shifted,
            remaining_shift_hours: remaining,
        })
    }
}

/// Convert fractional hours to a duration, rounded to the second.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn hours_to_duration(hours: f64) -> SignedDuration {
    SignedDuration::from_secs((hours * 3600.0).round() as i64)
}
