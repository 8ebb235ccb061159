//! Non-light parts of a plan: meals, caffeine, naps, and the
//! pre-flight and in-flight blocks.

use jiff::{Zoned, civil::Date};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
}

/// A meal anchor in destination-local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub kind: MealKind,
    pub time: Zoned,
    pub guidance: String,
}

/// When caffeine is allowed on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaffeineWindow {
    pub allowed_from: Zoned,
    pub cutoff: Zoned,
    pub rationale: String,
}

/// A single short strategic nap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nap {
    pub start: Zoned,
    pub end: Zoned,
    pub rationale: String,
}

/// One day of the pre-flight taper, in origin-local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreflightDay {
    /// 3, 2 or 1.
    pub days_before_departure: u8,
    pub date: Date,

    /// Signed adjustment applied to the usual bed and wake times.
    /// Negative is earlier.
    pub shift_minutes: i64,
    pub bedtime: Zoned,
    pub wake_time: Zoned,
    pub advice: String,
}

/// Static advice for the flight itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflightAdvice {
    pub overnight: bool,

    /// Recommended on-board sleep window in destination-local time.
    /// Present only for overnight flights.
    pub sleep_window: Option<(Zoned, Zoned)>,
    pub advice: Vec<String>,
}
