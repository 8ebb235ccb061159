//! Plan assembly.
//!
//! [`generate`] validates the request, resolves the shift once, then
//! builds every recovery day independently and in parallel. The result is
//! an immutable tree plus any non-fatal warnings about the model itself;
//! callers decide whether to log them.

pub mod audit;
pub mod validate;

use std::fmt;

use jiff::Timestamp;
use rayon::prelude::*;
use serde::Serialize;

use crate::circadian::{BodyClock, estimate_recovery_days, recovery_ceiling, shift_between};
use crate::error::Result;
use crate::model::{Direction, PlanRequest, RecoveryMode, RecoveryPlan};
use crate::schedule::{self, PlanContext};

pub use audit::{SafetyViolation, audit};
pub use validate::validate;

/// Aggressive plans never run longer than this.
const AGGRESSIVE_MAX_DAYS: u32 = 3;

/// Non-fatal findings. These point at model defects or odd input and are
/// meant for logs, not end users.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalculationWarning {
    /// The recovery estimate is above the sanity ceiling for the shift.
    RecoveryExceedsCeiling { days: u32, ceiling: u32 },

    /// Westward recovery came out slower than the same shift eastward.
    WestSlowerThanEast {
        shift_hours: f64,
        west_days: u32,
        east_days: u32,
    },

    /// Arrival precedes departure, but by less than the rejection threshold.
    ArrivalBeforeDeparture { hours: f64 },

    /// The assembled plan broke a safety rule.
    SafetyViolation(SafetyViolation),
}

impl fmt::Display for CalculationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecoveryExceedsCeiling { days, ceiling } => {
                write!(f, "recovery estimate of {days} days exceeds ceiling of {ceiling}")
            }
            Self::WestSlowerThanEast {
                shift_hours,
                west_days,
                east_days,
            } => write!(
                f,
                "{shift_hours}h westward recovery ({west_days} days) is slower than eastward ({east_days} days)"
            ),
            Self::ArrivalBeforeDeparture { hours } => {
                write!(f, "arrival is {hours:.1}h before departure")
            }
            Self::SafetyViolation(v) => write!(f, "safety rule broken: {v}"),
        }
    }
}

/// A plan and the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub plan: RecoveryPlan,
    pub warnings: Vec<CalculationWarning>,
}

/// Generate a plan, stamped with the current time.
pub fn generate(request: &PlanRequest) -> Result<GeneratedPlan> {
    generate_at(request, Timestamp::now())
}

/// Generate a plan with a fixed `generated_at`.
///
/// Identical requests produce identical plans.
pub fn generate_at(request: &PlanRequest, generated_at: Timestamp) -> Result<GeneratedPlan> {
    let validated = validate(request)?;
    let mut warnings = validated.advisories;

    let shift = shift_between(&validated.origin, &validated.destination, request.departure);
    let mode = request.recovery_mode;
    let recovery_days = estimate_recovery_days(shift.shift_hours, shift.direction, mode);
    warnings.extend(check_recovery(shift.shift_hours, shift.direction, mode, recovery_days));

    tracing::debug!(
        origin = %request.origin_timezone,
        destination = %request.destination_timezone,
        shift_hours = shift.shift_hours,
        direction = %shift.direction,
        recovery_days,
        "resolved timezone shift"
    );

    let ctx = PlanContext {
        origin: validated.origin,
        destination: validated.destination,
        shift,
        recovery_days,
        mode,
        sleep: request.sleep,
        departure: request.departure,
        arrival: request.arrival,
        flight_duration: validated.flight_duration,
        clock: BodyClock::new(&shift, recovery_days),
    };

    let days = (1..=recovery_days)
        .into_par_iter()
        .map(|day| schedule::generate_day(&ctx, day))
        .collect::<Result<Vec<_>>>()?;

    let plan = RecoveryPlan {
        origin_timezone: request.origin_timezone.clone(),
        destination_timezone: request.destination_timezone.clone(),
        shift,
        timezone_shift: shift.signed_hours(),
        direction: shift.direction,
        recovery_mode: mode,
        estimated_recovery_days: recovery_days,
        preflight: schedule::preflight::taper(&ctx)?,
        inflight: schedule::inflight::advice(&ctx)?,
        days,
        generated_at,
    };

    warnings.extend(audit(&plan).into_iter().map(CalculationWarning::SafetyViolation));
    tracing::debug!(
        days = plan.days.len(),
        sessions = plan.sessions().count(),
        warnings = warnings.len(),
        "assembled recovery plan"
    );

    Ok(GeneratedPlan { plan, warnings })
}

/// Sanity checks on the recovery estimate.
fn check_recovery(
    shift_hours: f64,
    direction: Direction,
    mode: RecoveryMode,
    days: u32,
) -> Vec<CalculationWarning> {
    let mut warnings = Vec::new();

    let ceiling = match mode {
        RecoveryMode::Conservative => recovery_ceiling(shift_hours),
        RecoveryMode::Aggressive => AGGRESSIVE_MAX_DAYS,
    };
    if days > ceiling {
        warnings.push(CalculationWarning::RecoveryExceedsCeiling { days, ceiling });
    }

    if direction == Direction::West {
        let east_days = estimate_recovery_days(shift_hours, Direction::East, mode);
        if days > east_days {
            warnings.push(CalculationWarning::WestSlowerThanEast {
                shift_hours,
                west_days: days,
                east_days,
            });
        }
    }

    warnings
}
