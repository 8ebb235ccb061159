//! Timezone shift: magnitude and direction of the clock change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which way the body clock has to move to match the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The clock must advance (destination is ahead on the shorter path).
    East,

    /// The clock must delay (destination is behind on the shorter path).
    West,

    /// No adjustment needed.
    None,
}

impl Direction {
    /// Sign of the adjustment: `+1` east, `-1` west, `0` for none.
    pub fn sign(self) -> f64 {
        match self {
            Self::East => 1.0,
            Self::West => -1.0,
            Self::None => 0.0,
        }
    }

    /// The opposite direction. `None` stays `None`.
    pub fn flipped(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::West => Self::East,
            Self::None => Self::None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::East => "east",
            Self::West => "west",
            Self::None => "none",
        })
    }
}

/// The shorter circadian path between two UTC offsets.
///
/// `raw_offset_hours` is the naive destination-minus-origin difference.
/// `shift_hours` is always within `[0, 12]`; when the raw difference
/// exceeds 12 hours the path wraps around the clock face and
/// `direction` is the inverse of the raw sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneShift {
    pub raw_offset_hours: f64,
    pub shift_hours: f64,
    pub direction: Direction,
}

impl TimezoneShift {
    /// The shift as a signed number of hours: positive east, negative west.
    pub fn signed_hours(&self) -> f64 {
        self.direction.sign() * self.shift_hours
    }

    /// Whether the path wrapped around the dateline side of the clock face.
    pub fn wrapped(&self) -> bool {
        self.raw_offset_hours.abs() > 12.0
    }
}
