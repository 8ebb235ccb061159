//! In-flight advice, keyed only by direction and whether the flight
//! crosses the destination night.

use jiff::{SignedDuration, Timestamp, ToSpan};

use crate::error::Result;
use crate::model::{Direction, InflightAdvice};

use super::{PlanContext, local_time};

/// Overlap with the destination night needed to call a flight overnight.
const OVERNIGHT_MIN_OVERLAP_HOURS: i64 = 3;

/// Advice for the flight itself.
pub fn advice(ctx: &PlanContext) -> Result<InflightAdvice> {
    let takeoff = ctx.departure;
    let landing = takeoff.checked_add(ctx.flight_duration)?;
    let best = longest_night_overlap(ctx, takeoff, landing)?;

    let overnight = best
        .is_some_and(|(start, end)| end.duration_since(start) >= SignedDuration::from_hours(OVERNIGHT_MIN_OVERLAP_HOURS));
    let sleep_window = if overnight {
        best.map(|(start, end)| {
            (
                start.to_zoned(ctx.destination.clone()),
                end.to_zoned(ctx.destination.clone()),
            )
        })
    } else {
        None
    };

    Ok(InflightAdvice {
        overnight,
        sleep_window,
        advice: static_advice(ctx.shift.direction, overnight)
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
    })
}

/// The longest stretch of the flight that falls inside a destination-local
/// night (usual bedtime to usual wake time).
fn longest_night_overlap(
    ctx: &PlanContext,
    takeoff: Timestamp,
    landing: Timestamp,
) -> Result<Option<(Timestamp, Timestamp)>> {
    let asleep = SignedDuration::from_hours(24 - ctx.sleep.awake_hours());
    let first = takeoff.to_zoned(ctx.destination.clone()).date();
    let last = landing.to_zoned(ctx.destination.clone()).date();

    let mut best: Option<(Timestamp, Timestamp)> = None;
    let mut date = first.checked_sub(1.day())?;
    while date <= last {
        // The night that ends on the morning after `date`.
        let night_end = local_time(&ctx.destination, date.checked_add(1.day())?, ctx.sleep.normal_wake_time)?
            .timestamp();
        let night_start = night_end.checked_sub(asleep)?;

        let start = night_start.max(takeoff);
        let end = night_end.min(landing);
        let longer = best.is_none_or(|(s, e)| end.duration_since(start) > e.duration_since(s));
        if end > start && longer {
            best = Some((start, end));
        }
        date = date.checked_add(1.day())?;
    }
    Ok(best)
}

fn static_advice(direction: Direction, overnight: bool) -> &'static [&'static str] {
    match (direction, overnight) {
        (Direction::East, true) => &[
            "Set your watch to destination time when you board.",
            "Sleep during the destination night window; use an eye mask and earplugs.",
            "Skip the meal service if it falls in the destination night.",
            "Avoid alcohol and caffeine on board.",
        ],
        (Direction::East, false) => &[
            "Set your watch to destination time when you board.",
            "Stay awake and keep cabin light bright if it is daytime at your destination.",
            "Drink water steadily and limit caffeine to the first half of the flight.",
        ],
        (Direction::West, true) => &[
            "Set your watch to destination time when you board.",
            "Sleep only during the destination night window; stay awake otherwise.",
            "Avoid alcohol on board.",
        ],
        (Direction::West, false) => &[
            "Set your watch to destination time when you board.",
            "Stay awake and seek light; you will be going to bed later than usual.",
            "A short nap under 30 minutes is fine if you are struggling.",
        ],
        (Direction::None, _) => &[
            "No time change: keep your usual sleep and meal times.",
            "Drink water steadily and move around the cabin.",
        ],
    }
}
