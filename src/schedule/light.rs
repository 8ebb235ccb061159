//! Light-therapy sessions for one recovery day.
//!
//! Candidate windows are visited in temporal order (wake, midday, makeup
//! or evening, pre-bed). Every candidate is run through the phase
//! classifier on the internal clock before it is emitted, and a seek
//! window is only emitted when the classification holds at both its start
//! and its last minute. A window that cannot be confirmed is dropped,
//! never emitted on assumption.

use jiff::Zoned;

use crate::circadian::{Classification, Verdict, classify, verdict};
use crate::error::Result;
use crate::model::{
    Direction, Intensity, LightSession, PhaseEffect, RecoveryMode, RecoveryPhase, SessionType,
};

use super::{DayFrame, PlanContext, add_minutes};

/// Fixed offset of the midday boost from wake time.
const MIDDAY_OFFSET_MINUTES: i64 = 6 * 60;

/// Offset of the eastward makeup probe from wake time.
const MAKEUP_OFFSET_MINUTES: i64 = 12 * 60;

/// Westward evening light must end this long before bedtime.
const EVENING_BED_BUFFER_MINUTES: i64 = 30;

/// Westward evening windows are moved earlier in these steps.
const EVENING_STEP_MINUTES: i64 = 30;

/// Shortest westward evening window; shifted rather than truncated below this.
const EVENING_FLOOR_MINUTES: i64 = 30;

/// Shortest window worth emitting after clipping to arrival.
const MIN_SESSION_MINUTES: i64 = 10;

/// Where in the day a candidate window sits. Drives the display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Wake,
    Midday,
    Makeup,
    Evening,
    PreBed,
}

/// A candidate window before classification.
#[derive(Debug, Clone)]
struct Window {
    slot: Slot,
    start: Zoned,
    end: Zoned,
}

/// Generate the light sessions for `frame`, ordered by start time.
pub fn sessions(ctx: &PlanContext, frame: &DayFrame) -> Result<Vec<LightSession>> {
    let mut sessions = match ctx.shift.direction {
        Direction::East => eastward(ctx, frame)?,
        Direction::West => westward(ctx, frame)?,
        Direction::None => Vec::new(),
    };
    sessions.sort_by(|a, b| a.start.cmp(&b.start));
    Ok(sessions)
}

/// Minutes of bright light per seek session.
pub fn seek_minutes(mode: RecoveryMode, phase: RecoveryPhase) -> i64 {
    match (mode, phase) {
        (RecoveryMode::Conservative, RecoveryPhase::Acute) => 30,
        (RecoveryMode::Conservative, RecoveryPhase::Adaptation) => 20,
        (RecoveryMode::Conservative, RecoveryPhase::Maintenance) => 15,
        (RecoveryMode::Aggressive, RecoveryPhase::Acute) => 60,
        (RecoveryMode::Aggressive, RecoveryPhase::Adaptation) => 45,
        (RecoveryMode::Aggressive, RecoveryPhase::Maintenance) => 30,
    }
}

/// Minutes of dim light per avoid session.
pub fn avoid_minutes(phase: RecoveryPhase) -> i64 {
    match phase {
        RecoveryPhase::Acute => 120,
        RecoveryPhase::Adaptation => 90,
        RecoveryPhase::Maintenance => 60,
    }
}

/// Brightness of seek sessions.
pub fn seek_intensity(mode: RecoveryMode, phase: RecoveryPhase) -> Intensity {
    match (mode, phase) {
        (RecoveryMode::Aggressive, RecoveryPhase::Acute) => Intensity::High,
        (_, RecoveryPhase::Maintenance) => Intensity::Low,
        _ => Intensity::Moderate,
    }
}

// ── Eastward ──

/// Eastward days chase advances.
///
/// If light across the whole wake window would advance the clock, seek it
/// there and again at the midday boost. Otherwise avoid light at wake and
/// probe a makeup window twelve hours later.
/// Evening light always delays, so every day ends with a pre-bed avoid.
fn eastward(ctx: &PlanContext, frame: &DayFrame) -> Result<Vec<LightSession>> {
    let seek = seek_minutes(ctx.mode, frame.phase);
    let avoid = avoid_minutes(frame.phase);
    let pre_bed_start = add_minutes(&frame.bed, -avoid)?;
    let mut sessions = Vec::new();

    let at_wake = classify_at(ctx, frame.day, &frame.wake, SessionType::Seek)?;
    let wake_seek = if at_wake.effect.is_advancing() {
        confirmed_seek(ctx, frame, window(Slot::Wake, &frame.wake, seek)?)?
    } else {
        None
    };

    if let Some(wake_seek) = wake_seek {
        sessions.push(wake_seek);

        let midday_start = add_minutes(&frame.wake, MIDDAY_OFFSET_MINUTES)?;
        let midday = window(Slot::Midday, &midday_start, seek)?;
        if midday.end <= pre_bed_start {
            sessions.extend(confirmed_seek(ctx, frame, midday)?);
        }
    } else {
        // Either the body is still in its delay window at wake, or the
        // wake window runs into it before it ends.
        let wake_avoid = window(Slot::Wake, &frame.wake, avoid)?;
        let earliest_makeup = wake_avoid.end.clone();
        sessions.extend(avoid_session(ctx, frame, wake_avoid)?);

        let mut makeup_start = add_minutes(&frame.wake, MAKEUP_OFFSET_MINUTES)?;
        if add_minutes(&makeup_start, seek)? > pre_bed_start {
            makeup_start = add_minutes(&pre_bed_start, -seek)?;
        }
        if makeup_start >= earliest_makeup {
            let makeup = window(Slot::Makeup, &makeup_start, seek)?;
            sessions.extend(confirmed_seek(ctx, frame, makeup)?);
        }
    }

    let pre_bed = Window {
        slot: Slot::PreBed,
        start: pre_bed_start,
        end: frame.bed.clone(),
    };
    sessions.extend(avoid_session(ctx, frame, pre_bed)?);

    Ok(sessions)
}

// ── Westward ──

/// Westward days chase delays.
///
/// Morning light would advance the clock, so it is avoided. Evening light
/// is sought in a window ending half an hour before bed, moved earlier
/// until the classifier confirms a delay across the whole window. If no
/// window between the midday mark and bedtime qualifies, none is emitted.
fn westward(ctx: &PlanContext, frame: &DayFrame) -> Result<Vec<LightSession>> {
    let seek = seek_minutes(ctx.mode, frame.phase).max(EVENING_FLOOR_MINUTES);
    let avoid = avoid_minutes(frame.phase);
    let mut sessions = Vec::new();

    let wake_avoid = window(Slot::Wake, &frame.wake, avoid)?;
    sessions.extend(avoid_session(ctx, frame, wake_avoid)?);

    let earliest = add_minutes(&frame.wake, MIDDAY_OFFSET_MINUTES)?;
    let latest_end = add_minutes(&frame.bed, -EVENING_BED_BUFFER_MINUTES)?;
    let mut start = add_minutes(&latest_end, -seek)?;
    while start >= earliest {
        let candidate = window(Slot::Evening, &start, seek)?;
        if let Some(session) = confirmed_seek_with_floor(ctx, frame, candidate, EVENING_FLOOR_MINUTES)? {
            sessions.push(session);
            break;
        }
        start = add_minutes(&start, -EVENING_STEP_MINUTES)?;
    }

    Ok(sessions)
}

// ── Classification ──

fn window(slot: Slot, start: &Zoned, minutes: i64) -> Result<Window> {
    Ok(Window {
        slot,
        start: start.clone(),
        end: add_minutes(start, minutes)?,
    })
}

fn classify_at(ctx: &PlanContext, day: u32, at: &Zoned, action: SessionType) -> Result<Classification> {
    let estimate = ctx.clock.estimate(at, day)?;
    Ok(classify(estimate.internal_hour(), action))
}

fn confirmed_seek(ctx: &PlanContext, frame: &DayFrame, window: Window) -> Result<Option<LightSession>> {
    confirmed_seek_with_floor(ctx, frame, window, MIN_SESSION_MINUTES)
}

/// Emit a seek session only if seeking light is beneficial for the
/// plan's direction at both ends of the (arrival-clipped) window.
fn confirmed_seek_with_floor(
    ctx: &PlanContext,
    frame: &DayFrame,
    window: Window,
    floor_minutes: i64,
) -> Result<Option<LightSession>> {
    let Some((start, end)) = ctx.clip_to_arrival(window.start, window.end, floor_minutes) else {
        return Ok(None);
    };
    let last_minute = add_minutes(&end, -1)?;
    let first = classify_at(ctx, frame.day, &start, SessionType::Seek)?;
    let last = classify_at(ctx, frame.day, &last_minute, SessionType::Seek)?;

    let direction = ctx.shift.direction;
    if verdict(direction, first.effect) != Verdict::Beneficial
        || verdict(direction, last.effect) != Verdict::Beneficial
    {
        return Ok(None);
    }

    let intensity = seek_intensity(ctx.mode, frame.phase);
    Ok(Some(LightSession {
        start,
        end,
        session_type: SessionType::Seek,
        intensity,
        lux: intensity.lux(),
        circadian_phase: first.phase,
        effect_on_phase: first.effect,
        rationale: rationale(window.slot, SessionType::Seek, first.effect),
    }))
}

/// Emit an avoid session unless darkness would work against the plan's
/// direction at the window's start.
fn avoid_session(ctx: &PlanContext, frame: &DayFrame, window: Window) -> Result<Option<LightSession>> {
    let Some((start, end)) = ctx.clip_to_arrival(window.start, window.end, MIN_SESSION_MINUTES) else {
        return Ok(None);
    };
    let at_start = classify_at(ctx, frame.day, &start, SessionType::Avoid)?;
    if verdict(ctx.shift.direction, at_start.effect) == Verdict::Harmful {
        return Ok(None);
    }

    Ok(Some(LightSession {
        start,
        end,
        session_type: SessionType::Avoid,
        intensity: Intensity::Dim,
        lux: Intensity::Dim.lux(),
        circadian_phase: at_start.phase,
        effect_on_phase: at_start.effect,
        rationale: rationale(window.slot, SessionType::Avoid, at_start.effect),
    }))
}

fn rationale(slot: Slot, action: SessionType, effect: PhaseEffect) -> String {
    let what = match (slot, action) {
        (Slot::Wake, SessionType::Seek) => "Get bright light as soon as you wake",
        (Slot::Wake, SessionType::Avoid) => {
            "Keep light dim after waking; wear sunglasses outdoors"
        }
        (Slot::Midday, _) => "Top up with bright light around midday",
        (Slot::Makeup, _) => "Catch a second window of bright light later in the day",
        (Slot::Evening, _) => "Get bright light in the evening, finishing before bed",
        (Slot::PreBed, _) => "Dim the lights and avoid screens before bed",
    };
    let why = match effect {
        PhaseEffect::Advance => "this pulls your body clock earlier",
        PhaseEffect::WeakAdvance => "this nudges your body clock earlier",
        PhaseEffect::Delay => "this pushes your body clock later",
        PhaseEffect::Neutral => "light now would not help your adjustment",
    };
    format!("{what}: {why}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::RecoveryMode;
    use crate::schedule::sleep::frame;
    use crate::schedule::testing::{context, london_to_new_york, taipei_to_vancouver};

    fn day_sessions(ctx: &PlanContext, day: u32) -> Vec<LightSession> {
        let frame = frame(ctx, day).unwrap();
        sessions(ctx, &frame).unwrap()
    }

    fn seeks(sessions: &[LightSession]) -> Vec<&LightSession> {
        sessions
            .iter()
            .filter(|s| s.session_type == SessionType::Seek)
            .collect()
    }

    #[test]
    fn london_to_new_york_day_one_seeks_evening_delay() {
        let ctx = london_to_new_york();
        let sessions = day_sessions(&ctx, 1);
        let seeks = seeks(&sessions);

        assert_eq!(seeks.len(), 1);
        let evening = seeks[0];
        assert_eq!(evening.effect_on_phase, PhaseEffect::Delay);
        assert_eq!(evening.circadian_phase, crate::model::CircadianPhase::Evening);

        // Bed is 20:00 local; the window finishes at least 30 minutes before.
        let bed = frame(&ctx, 1).unwrap().bed;
        assert!(add_minutes(&evening.end, EVENING_BED_BUFFER_MINUTES).unwrap() <= bed);
        assert!(
            evening.end.timestamp().duration_since(evening.start.timestamp())
                >= jiff::SignedDuration::from_mins(EVENING_FLOOR_MINUTES)
        );
    }

    #[test]
    fn london_to_new_york_skips_windows_before_landing() {
        let ctx = london_to_new_york();
        let sessions = day_sessions(&ctx, 1);
        assert!(sessions.iter().all(|s| ctx.after_arrival(&s.start)));

        // Day 2 keeps its morning avoid.
        let day2 = day_sessions(&ctx, 2);
        assert_eq!(day2[0].session_type, SessionType::Avoid);
    }

    #[test]
    fn westward_never_seeks_advancing_light() {
        let ctx = london_to_new_york();
        for day in 1..=ctx.recovery_days {
            for session in seeks(&day_sessions(&ctx, day)) {
                assert_eq!(session.effect_on_phase, PhaseEffect::Delay, "day {day}");
            }
        }
    }

    #[test]
    fn taipei_to_vancouver_day_one_avoids_morning_light() {
        let ctx = taipei_to_vancouver();
        let sessions = day_sessions(&ctx, 1);

        // Wake at 08:00 local is 23:00 on the body clock: seeking would delay.
        let first = &sessions[0];
        assert_eq!(first.session_type, SessionType::Avoid);
        assert_eq!(first.start.hour(), 8);

        for session in seeks(&sessions) {
            assert!(session.effect_on_phase.is_advancing());
        }
    }

    #[test]
    fn taipei_to_vancouver_day_one_finds_makeup_light() {
        let ctx = taipei_to_vancouver();
        let sessions = day_sessions(&ctx, 1);
        let seeks = seeks(&sessions);

        assert_eq!(seeks.len(), 1);
        assert_eq!(seeks[0].start.hour(), 20);
        assert_eq!(seeks[0].effect_on_phase, PhaseEffect::Advance);
    }

    #[test]
    fn eastward_always_ends_with_pre_bed_avoid() {
        let ctx = taipei_to_vancouver();
        for day in 1..=ctx.recovery_days {
            let sessions = day_sessions(&ctx, day);
            let last = sessions.last().unwrap();
            assert_eq!(last.session_type, SessionType::Avoid);
            assert_eq!(last.end, frame(&ctx, day).unwrap().bed);
        }
    }

    #[test]
    fn eastward_never_seeks_delaying_light() {
        let ctx = taipei_to_vancouver();
        for day in 1..=ctx.recovery_days {
            for session in seeks(&day_sessions(&ctx, day)) {
                assert_ne!(session.effect_on_phase, PhaseEffect::Delay, "day {day}");
            }
        }
    }

    #[test]
    fn small_eastward_shift_seeks_at_wake_and_midday() {
        // Paris to Dubai: two hours east.
        let ctx = context(
            "Europe/Paris",
            "Asia/Dubai",
            "2024-06-01T06:00:00Z",
            "2024-06-01T12:00:00Z",
            RecoveryMode::Conservative,
        );
        let sessions = day_sessions(&ctx, 2);
        let seeks = seeks(&sessions);
        assert_eq!(seeks.len(), 2);
        assert_eq!(seeks[0].effect_on_phase, PhaseEffect::Advance);
        assert!(seeks[1].start > seeks[0].end);
    }

    #[test]
    fn sessions_are_ordered_and_disjoint() {
        for ctx in [london_to_new_york(), taipei_to_vancouver()] {
            for day in 1..=ctx.recovery_days {
                let sessions = day_sessions(&ctx, day);
                for pair in sessions.windows(2) {
                    assert!(pair[0].end <= pair[1].start, "day {day}");
                }
            }
        }
    }

    #[test]
    fn no_shift_means_no_sessions() {
        let ctx = context(
            "Europe/Paris",
            "Europe/Berlin",
            "2024-06-01T06:00:00Z",
            "2024-06-01T08:00:00Z",
            RecoveryMode::Conservative,
        );
        let frame = frame(&ctx, 1).unwrap();
        assert!(sessions(&ctx, &frame).unwrap().is_empty());
    }

    #[test]
    fn intensity_follows_mode_and_phase() {
        assert_eq!(
            seek_intensity(RecoveryMode::Aggressive, RecoveryPhase::Acute),
            Intensity::High
        );
        assert_eq!(
            seek_intensity(RecoveryMode::Conservative, RecoveryPhase::Acute),
            Intensity::Moderate
        );
        assert_eq!(
            seek_intensity(RecoveryMode::Aggressive, RecoveryPhase::Maintenance),
            Intensity::Low
        );
        assert!(
            seek_minutes(RecoveryMode::Aggressive, RecoveryPhase::Acute)
                > seek_minutes(RecoveryMode::Conservative, RecoveryPhase::Acute)
        );
    }

    #[test]
    fn wake_seek_running_into_the_delay_window_falls_back_to_avoid() {
        // Three hours east with a late sleeper: day 2 wakes at 19:00, which is
        // 17:30 on the body clock, so a full hour of light would end in the
        // evening bucket.
        let mut ctx = context(
            "Pacific/Honolulu",
            "America/Los_Angeles",
            "2024-06-01T18:00:00Z",
            "2024-06-01T23:30:00Z",
            RecoveryMode::Aggressive,
        );
        ctx.sleep = crate::model::SleepPreferences {
            normal_bedtime: 10,
            normal_wake_time: 18,
        };
        let frame = frame(&ctx, 2).unwrap();
        assert_eq!(frame.wake.hour(), 19);

        let day = sessions(&ctx, &frame).unwrap();
        let at_wake = day.iter().find(|s| s.start == frame.wake).unwrap();
        assert_eq!(at_wake.session_type, SessionType::Avoid);

        let makeup = seeks(&day);
        assert_eq!(makeup.len(), 1);
        assert!(makeup[0].effect_on_phase.is_advancing());
        assert_eq!(makeup[0].start.hour(), 7);
    }
}
