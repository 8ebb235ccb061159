//! The circadian model: timezone arithmetic, recovery duration,
//! body-clock drift, and the phase-response classifier.
//!
//! Everything here is a pure function of its inputs. Data flows one way:
//! offsets → shift → recovery days → body-clock estimate → phase.

pub mod body_clock;
pub mod phase;
pub mod recovery;
pub mod shift;
pub mod timezone;

pub use body_clock::{BodyClock, BodyClockEstimate};
pub use phase::{Classification, Verdict, classify, decide, verdict};
pub use recovery::{estimate_recovery_days, recovery_ceiling};
pub use shift::{shift_between, shift_from_offsets};
