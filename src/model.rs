//! Core data model for jetlag.
//!
//! These types form the recovery-plan tree handed to callers:
//! the timezone shift, the per-day schedules, and the light-therapy
//! sessions inside them. Everything here is built once per plan
//! generation and never mutated afterward.

mod plan;
mod request;
mod routine;
mod session;
mod shift;

pub use plan::{RecoveryDay, RecoveryMode, RecoveryPhase, RecoveryPlan, SleepBlock};
pub use request::{PlanRequest, SleepPreferences};
pub use routine::{CaffeineWindow, InflightAdvice, Meal, MealKind, Nap, PreflightDay};
pub use session::{CircadianPhase, Intensity, LightSession, LuxRange, PhaseEffect, SessionType};
pub use shift::{Direction, TimezoneShift};
