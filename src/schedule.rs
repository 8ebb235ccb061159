//! Day schedule generation.
//!
//! Each recovery day is computed independently from its index and the
//! plan's fixed [`PlanContext`]; there is no state carried between days.

pub mod caffeine;
pub mod inflight;
pub mod light;
pub mod meals;
pub mod nap;
pub mod preflight;
pub mod sleep;

use jiff::{SignedDuration, Timestamp, Zoned, civil::Date, civil::Time, tz::TimeZone};

use crate::circadian::BodyClock;
use crate::error::Result;
use crate::model::{RecoveryDay, RecoveryMode, SleepPreferences, TimezoneShift};

pub use sleep::DayFrame;

/// Everything a day generator needs, resolved once per plan.
#[derive(Debug, Clone)]
pub struct PlanContext {
    pub origin: TimeZone,
    pub destination: TimeZone,
    pub shift: TimezoneShift,
    pub recovery_days: u32,
    pub mode: RecoveryMode,
    pub sleep: SleepPreferences,
    pub departure: Timestamp,
    pub arrival: Timestamp,
    pub flight_duration: SignedDuration,
    pub clock: BodyClock,
}

impl PlanContext {
    /// Destination-local calendar date of arrival: recovery day 1.
    pub fn arrival_date(&self) -> Date {
        self.arrival.to_zoned(self.destination.clone()).date()
    }

    /// Arrival as a destination-local time.
    pub fn arrival_local(&self) -> Zoned {
        self.arrival.to_zoned(self.destination.clone())
    }

    /// Whether `time` falls after the traveler has landed.
    pub fn after_arrival(&self, time: &Zoned) -> bool {
        time.timestamp() >= self.arrival
    }

    /// Trim a window so it starts no earlier than arrival.
    ///
    /// Returns `None` when less than `min_minutes` of it remains.
    pub fn clip_to_arrival(&self, start: Zoned, end: Zoned, min_minutes: i64) -> Option<(Zoned, Zoned)> {
        let start = if self.after_arrival(&start) {
            start
        } else {
            self.arrival_local()
        };
        let remaining = end.timestamp().duration_since(start.timestamp());
        (remaining >= SignedDuration::from_mins(min_minutes)).then_some((start, end))
    }
}

/// Build one recovery day.
pub fn generate_day(ctx: &PlanContext, day: u32) -> Result<RecoveryDay> {
    let frame = sleep::frame(ctx, day)?;
    let sleep = sleep::sleep_block(ctx, &frame)?;
    let light_sessions = light::sessions(ctx, &frame)?;
    let meals = meals::meals(ctx, &frame)?;
    let caffeine = caffeine::window(ctx, &frame)?;
    let nap = nap::nap(ctx, &frame)?;

    Ok(RecoveryDay {
        day,
        date: frame.date,
        phase: frame.phase,
        wake_time: frame.wake,
        bedtime: frame.bed,
        sleep,
        light_sessions,
        meals,
        caffeine,
        nap,
    })
}

/// `hour:00` on `date` in `tz`, using compatible disambiguation across DST gaps.
pub(crate) fn local_time(tz: &TimeZone, date: Date, hour: u8) -> Result<Zoned> {
    let datetime = date
        .to_datetime(Time::midnight())
        .checked_add(SignedDuration::from_hours(i64::from(hour)))?;
    Ok(datetime.to_zoned(tz.clone())?)
}

/// `time` moved by a signed number of minutes.
pub(crate) fn add_minutes(time: &Zoned, minutes: i64) -> Result<Zoned> {
    Ok(time.checked_add(SignedDuration::from_mins(minutes))?)
}
