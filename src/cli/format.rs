//! Output formatting for CLI display.

use std::fmt::Write;

use jiff::Zoned;

use crate::model::{
    CircadianPhase, Direction, Intensity, LightSession, MealKind, PhaseEffect, RecoveryDay, RecoveryPhase,
    RecoveryPlan, SessionType, TimezoneShift,
};
use crate::storage::PlanSummary;

/// One-line description of a shift, e.g. `9h east (raw -15h)`.
pub(super) fn format_shift(shift: &TimezoneShift) -> String {
    if shift.direction == Direction::None {
        return "no shift".to_string();
    }
    format!(
        "{}h {} (raw {:+}h)",
        shift.shift_hours, shift.direction, shift.raw_offset_hours
    )
}

/// One archive listing line.
pub(super) fn format_plan_row(p: &PlanSummary) -> String {
    let short_id = &p.id.to_string()[..8];
    format!(
        "{short_id}  {} → {}  {}h {}, {} day(s)  [saved {}]",
        p.origin_timezone,
        p.destination_timezone,
        p.shift_hours,
        p.direction,
        p.recovery_days,
        p.saved_at.strftime("%Y-%m-%d %H:%M UTC"),
    )
}

/// Multi-line, human-readable rendering of a whole plan.
pub(super) fn format_plan(plan: &RecoveryPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} → {}: {}, {} recovery day(s), {}",
        plan.origin_timezone,
        plan.destination_timezone,
        format_shift(&plan.shift),
        plan.estimated_recovery_days,
        plan.recovery_mode,
    );

    if !plan.preflight.is_empty() {
        let _ = writeln!(out, "\nBefore departure");
        for p in &plan.preflight {
            let _ = writeln!(
                out,
                "  {} day(s) before ({}): wake {}, bed {}",
                p.days_before_departure,
                p.date,
                hm(&p.wake_time),
                hm(&p.bedtime),
            );
        }
    }

    let _ = writeln!(out, "\nIn flight");
    if let Some((start, end)) = &plan.inflight.sleep_window {
        let _ = writeln!(out, "  sleep {}–{} destination time", hm(start), hm(end));
    }
    for line in &plan.inflight.advice {
        let _ = writeln!(out, "  - {line}");
    }

    for day in &plan.days {
        out.push('\n');
        out.push_str(&format_day(day));
    }

    out.trim_end().to_string()
}

fn format_day(day: &RecoveryDay) -> String {
    let mut out = format!(
        "Day {} ({}, {})  wake {}  bed {}\n",
        day.day,
        day.date,
        phase_label(day.phase),
        hm(&day.wake_time),
        hm(&day.bedtime),
    );
    for s in &day.light_sessions {
        let _ = writeln!(out, "  {}", format_session(s));
    }
    if !day.meals.is_empty() {
        let meals: Vec<String> = day
            .meals
            .iter()
            .map(|m| format!("{} {}", meal_label(m.kind), hm(&m.time)))
            .collect();
        let _ = writeln!(out, "  meals: {}", meals.join(", "));
    }
    if let Some(c) = &day.caffeine {
        let _ = writeln!(out, "  caffeine: {}–{}", hm(&c.allowed_from), hm(&c.cutoff));
    }
    if let Some(n) = &day.nap {
        let _ = writeln!(out, "  nap: {}–{}", hm(&n.start), hm(&n.end));
    }
    out
}

fn format_session(s: &LightSession) -> String {
    let kind = match s.session_type {
        SessionType::Seek => "seek ",
        SessionType::Avoid => "avoid",
    };
    format!(
        "{kind} {}–{}  {} {}–{} lux  ({}, {})",
        hm(&s.start),
        hm(&s.end),
        intensity_label(s.intensity),
        s.lux.min,
        s.lux.max,
        circadian_label(s.circadian_phase),
        effect_label(s.effect_on_phase),
    )
}

fn hm(time: &Zoned) -> String {
    time.strftime("%H:%M").to_string()
}

fn phase_label(phase: RecoveryPhase) -> &'static str {
    match phase {
        RecoveryPhase::Acute => "acute",
        RecoveryPhase::Adaptation => "adaptation",
        RecoveryPhase::Maintenance => "maintenance",
    }
}

fn meal_label(kind: MealKind) -> &'static str {
    match kind {
        MealKind::Breakfast => "breakfast",
        MealKind::Lunch => "lunch",
        MealKind::Dinner => "dinner",
    }
}

fn intensity_label(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Dim => "dim",
        Intensity::Low => "low",
        Intensity::Moderate => "moderate",
        Intensity::High => "high",
    }
}

fn circadian_label(phase: CircadianPhase) -> &'static str {
    match phase {
        CircadianPhase::LateNight => "late night",
        CircadianPhase::Morning => "morning",
        CircadianPhase::Afternoon => "afternoon",
        CircadianPhase::Evening => "evening",
    }
}

fn effect_label(effect: PhaseEffect) -> &'static str {
    match effect {
        PhaseEffect::Advance => "advance",
        PhaseEffect::WeakAdvance => "weak advance",
        PhaseEffect::Neutral => "neutral",
        PhaseEffect::Delay => "delay",
    }
}
