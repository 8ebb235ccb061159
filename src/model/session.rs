//! Light-therapy session types.

use jiff::Zoned;
use serde::{Deserialize, Serialize};

/// Whether a session asks the traveler to get bright light or stay in dim light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Seek,
    Avoid,
}

/// Bucket of the internal (body) clock a light window falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircadianPhase {
    /// `[0, 4)`. Closest to the temperature minimum; strongest response.
    LateNight,
    /// `[4, 12)`.
    Morning,
    /// `[12, 18)`.
    Afternoon,
    /// `[18, 24)`.
    Evening,
}

/// What a light action does to the body clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEffect {
    Advance,
    WeakAdvance,
    Neutral,
    Delay,
}

impl PhaseEffect {
    /// True for `Advance` and `WeakAdvance`.
    pub fn is_advancing(self) -> bool {
        matches!(self, Self::Advance | Self::WeakAdvance)
    }
}

/// How bright a seek session should be, or `Dim` for avoid sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Dim,
    Low,
    Moderate,
    High,
}

impl Intensity {
    /// Target illuminance for this intensity.
    pub fn lux(self) -> LuxRange {
        match self {
            Self::Dim => LuxRange { min: 0, max: 50 },
            Self::Low => LuxRange {
                min: 1_000,
                max: 2_500,
            },
            Self::Moderate => LuxRange {
                min: 2_500,
                max: 5_000,
            },
            Self::High => LuxRange {
                min: 5_000,
                max: 10_000,
            },
        }
    }
}

/// Illuminance target in lux, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuxRange {
    pub min: u32,
    pub max: u32,
}

/// A single window of light exposure or avoidance, in destination-local time.
///
/// `circadian_phase` and `effect_on_phase` are the classifier's verdict
/// for the window on the traveler's internal clock, not the wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSession {
    pub start: Zoned,
    pub end: Zoned,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub intensity: Intensity,
    pub lux: LuxRange,
    pub circadian_phase: CircadianPhase,
    pub effect_on_phase: PhaseEffect,

    /// Display text explaining the recommendation.
    pub rationale: String,
}
