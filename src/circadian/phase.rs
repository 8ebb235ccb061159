//! Phase classification: the phase-response curve as a lookup table.
//!
//! Light near the body's temperature minimum advances the clock most
//! strongly; evening light delays it. Avoiding light matters only in the
//! evening, where darkness lets the clock advance.
//!
//! | internal hour | phase      | seek         | avoid   |
//! |---------------|------------|--------------|---------|
//! | `[0, 4)`      | late night | advance      | neutral |
//! | `[4, 12)`     | morning    | advance      | neutral |
//! | `[12, 18)`    | afternoon  | weak advance | neutral |
//! | `[18, 24)`    | evening    | delay        | advance |
//!
//! Every light decision in the crate goes through [`classify`]; nothing
//! else maps hours to effects.

use crate::model::{CircadianPhase, Direction, PhaseEffect, SessionType};

/// One row of the response curve.
struct Response {
    phase: CircadianPhase,
    /// Inclusive lower bound; the upper bound is the next row's `from`.
    from: f64,
    seek: PhaseEffect,
    avoid: PhaseEffect,
}

impl Response {
    fn effect(&self, action: SessionType) -> PhaseEffect {
        match action {
            SessionType::Seek => self.seek,
            SessionType::Avoid => self.avoid,
        }
    }
}

const RESPONSE_CURVE: [Response; 4] = [
    Response {
        phase: CircadianPhase::LateNight,
        from: 0.0,
        seek: PhaseEffect::Advance,
        avoid: PhaseEffect::Neutral,
    },
    Response {
        phase: CircadianPhase::Morning,
        from: 4.0,
        seek: PhaseEffect::Advance,
        avoid: PhaseEffect::Neutral,
    },
    Response {
        phase: CircadianPhase::Afternoon,
        from: 12.0,
        seek: PhaseEffect::WeakAdvance,
        avoid: PhaseEffect::Neutral,
    },
    Response {
        phase: CircadianPhase::Evening,
        from: 18.0,
        seek: PhaseEffect::Delay,
        avoid: PhaseEffect::Advance,
    },
];

/// The classifier's verdict for one internal hour and action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub phase: CircadianPhase,
    pub effect: PhaseEffect,
}

/// How an effect relates to the adaptation goal of a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Beneficial,
    Harmless,
    Harmful,
}

/// Classify a light action at an internal-clock hour.
///
/// Hours outside `[0, 24)` are wrapped onto the clock face.
pub fn classify(internal_hour: f64, action: SessionType) -> Classification {
    let hour = internal_hour.rem_euclid(24.0);
    let row = RESPONSE_CURVE
        .iter()
        .rev()
        .find(|r| hour >= r.from)
        .unwrap_or(&RESPONSE_CURVE[0]);

    Classification {
        phase: row.phase,
        effect: row.effect(action),
    }
}

/// Judge an effect against the goal of a direction.
///
/// East needs advances, west needs delays. With no shift nothing matters.
pub fn verdict(direction: Direction, effect: PhaseEffect) -> Verdict {
    match (direction, effect) {
        (Direction::None, _) | (_, PhaseEffect::Neutral) => Verdict::Harmless,
        (Direction::East, PhaseEffect::Advance | PhaseEffect::WeakAdvance)
        | (Direction::West, PhaseEffect::Delay) => Verdict::Beneficial,
        (Direction::East, PhaseEffect::Delay)
        | (Direction::West, PhaseEffect::Advance | PhaseEffect::WeakAdvance) => Verdict::Harmful,
    }
}

/// The decision table: the verdict for taking `action` during `phase`
/// when adapting in `direction`.
pub fn decide(direction: Direction, phase: CircadianPhase, action: SessionType) -> Verdict {
    let row = RESPONSE_CURVE
        .iter()
        .find(|r| r.phase == phase)
        .unwrap_or(&RESPONSE_CURVE[0]);
    verdict(direction, row.effect(action))
}
