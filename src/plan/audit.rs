//! Safety audit of an assembled plan.
//!
//! A wrong light recommendation actively worsens jet lag, so the assembled
//! plan is checked against the rules the generators are built to obey:
//!
//! - eastward plans never seek light that delays the clock;
//! - westward plans in the acute phase seek advancing light at most once
//!   per day.

use std::fmt;

use jiff::Zoned;
use serde::Serialize;

use crate::model::{Direction, PhaseEffect, RecoveryPhase, RecoveryPlan, SessionType};

/// Most advancing seek sessions tolerated on an acute westward day.
pub const WEST_ACUTE_ADVANCE_BUDGET: usize = 1;

/// A session that breaks a safety rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum SafetyViolation {
    /// An eastward plan seeks light that delays the clock.
    EastwardDelaySeek { day: u32, start: Zoned },

    /// An acute westward day seeks advancing light too often.
    WestwardAcuteAdvance { day: u32, count: usize },
}

impl fmt::Display for SafetyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EastwardDelaySeek { day, start } => {
                write!(f, "day {day}: eastward seek at {start} delays the body clock")
            }
            Self::WestwardAcuteAdvance { day, count } => write!(
                f,
                "day {day}: {count} advancing seek sessions on an acute westward day"
            ),
        }
    }
}

/// Check every session of `plan`. Returns an empty list for a safe plan.
pub fn audit(plan: &RecoveryPlan) -> Vec<SafetyViolation> {
    let mut violations = Vec::new();
    match plan.direction {
        Direction::East => {
            violations.extend(
                plan.sessions()
                    .filter(|(_, s)| {
                        s.session_type == SessionType::Seek
                            && s.effect_on_phase == PhaseEffect::Delay
                    })
                    .map(|(d, s)| SafetyViolation::EastwardDelaySeek {
                        day: d.day,
                        start: s.start.clone(),
                    }),
            );
        }
        Direction::West => {
            for day in plan.days.iter().filter(|d| d.phase == RecoveryPhase::Acute) {
                let count = day
                    .light_sessions
                    .iter()
                    .filter(|s| s.session_type == SessionType::Seek && s.effect_on_phase.is_advancing())
                    .count();
                if count > WEST_ACUTE_ADVANCE_BUDGET {
                    violations.push(SafetyViolation::WestwardAcuteAdvance {
                        day: day.day,
                        count,
                    });
                }
            }
        }
        Direction::None => {}
    }
    violations
}
