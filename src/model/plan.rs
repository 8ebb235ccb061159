//! The recovery plan tree.

use std::fmt;

use jiff::{Timestamp, Zoned, civil::Date};
use serde::{Deserialize, Serialize};

use super::{CaffeineWindow, Direction, InflightAdvice, LightSession, Meal, Nap, PreflightDay, TimezoneShift};

/// Which recovery policy to plan with. The two are never blended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMode {
    /// Research-based passive adaptation rates.
    #[default]
    Conservative,

    /// Intensive protocol, capped at three recovery days.
    Aggressive,
}

impl fmt::Display for RecoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Conservative => "conservative",
            Self::Aggressive => "aggressive",
        })
    }
}

/// Stage of recovery, by day since arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPhase {
    /// Days 1–3.
    Acute,
    /// Days 4–7.
    Adaptation,
    /// Day 8 onward.
    Maintenance,
}

impl RecoveryPhase {
    /// The phase for a 1-based day index.
    pub fn for_day(day: u32) -> Self {
        match day {
            0..=3 => Self::Acute,
            4..=7 => Self::Adaptation,
            _ => Self::Maintenance,
        }
    }
}

/// Night sleep following a recovery day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepBlock {
    pub start: Zoned,
    pub end: Zoned,
}

/// One calendar day after arrival, in destination-local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryDay {
    /// 1-based.
    pub day: u32,
    pub date: Date,
    pub phase: RecoveryPhase,
    pub wake_time: Zoned,
    pub bedtime: Zoned,
    pub sleep: SleepBlock,

    /// Ordered by start time.
    pub light_sessions: Vec<LightSession>,
    pub meals: Vec<Meal>,
    pub caffeine: Option<CaffeineWindow>,
    pub nap: Option<Nap>,
}

/// The full multi-day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryPlan {
    pub origin_timezone: String,
    pub destination_timezone: String,
    pub shift: TimezoneShift,

    /// Signed shorter-path shift: positive east, negative west.
    pub timezone_shift: f64,
    pub direction: Direction,
    pub recovery_mode: RecoveryMode,
    pub estimated_recovery_days: u32,
    pub preflight: Vec<PreflightDay>,
    pub inflight: InflightAdvice,

    /// Days `1..=estimated_recovery_days`, in order.
    pub days: Vec<RecoveryDay>,
    pub generated_at: Timestamp,
}

impl RecoveryPlan {
    /// Every light session in the plan, paired with its day.
    pub fn sessions(&self) -> impl Iterator<Item = (&RecoveryDay, &LightSession)> {
        self.days
            .iter()
            .flat_map(|d| d.light_sessions.iter().map(move |s| (d, s)))
    }
}
