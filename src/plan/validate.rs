//! Up-front request validation.
//!
//! Every fatal condition is caught here, before any day is generated, so
//! plan assembly never fails halfway through.

use jiff::{SignedDuration, tz::TimeZone};

use crate::circadian::timezone::resolve;
use crate::error::{PlanError, Result};
use crate::model::PlanRequest;

use super::CalculationWarning;

/// Longest accepted flight.
pub const MAX_FLIGHT_HOURS: f64 = 48.0;

/// Arrival may precede departure by up to this much before the request is
/// treated as a data error. Smaller gaps are tolerated for dateline
/// itineraries recorded in local time.
pub const MAX_ARRIVAL_BEFORE_DEPARTURE_HOURS: f64 = 12.0;

/// The resolved pieces of a valid request.
#[derive(Debug, Clone)]
pub struct Validated {
    pub origin: TimeZone,
    pub destination: TimeZone,
    pub flight_duration: SignedDuration,
    pub advisories: Vec<CalculationWarning>,
}

/// Check a request and resolve its timezones.
pub fn validate(request: &PlanRequest) -> Result<Validated> {
    let sleep = request.sleep;
    if sleep.normal_bedtime > 23 {
        return Err(PlanError::InvalidSleepPreference {
            field: "normalBedtime",
            hour: sleep.normal_bedtime,
        });
    }
    if sleep.normal_wake_time > 23 || sleep.normal_wake_time == sleep.normal_bedtime {
        return Err(PlanError::InvalidSleepPreference {
            field: "normalWakeTime",
            hour: sleep.normal_wake_time,
        });
    }

    let origin = resolve(&request.origin_timezone)?;
    let destination = resolve(&request.destination_timezone)?;

    let hours = request.flight_duration_hours;
    if !(0.0..=MAX_FLIGHT_HOURS).contains(&hours) {
        return Err(PlanError::InvalidDuration(hours));
    }

    let mut advisories = Vec::new();
    let gap_hours = request.arrival.duration_since(request.departure).as_secs_f64() / 3600.0;
    if gap_hours < -MAX_ARRIVAL_BEFORE_DEPARTURE_HOURS {
        return Err(PlanError::ImplausibleTiming { hours: -gap_hours });
    }
    if gap_hours < 0.0 {
        advisories.push(CalculationWarning::ArrivalBeforeDeparture { hours: -gap_hours });
    }

    Ok(Validated {
        origin,
        destination,
        flight_duration: SignedDuration::from_secs_f64(hours * 3600.0),
        advisories,
    })
}
