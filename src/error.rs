//! Errors raised while validating a plan request.

/// Fatal conditions. All of them are detected before any day is generated.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("flight duration must be between 0 and 48 hours, got {0}")]
    InvalidDuration(f64),

    #[error("arrival is {hours:.1} hours before departure; check the itinerary timezones")]
    ImplausibleTiming { hours: f64 },

    #[error("{field} must be an hour between 0 and 23 and differ from the other sleep time, got {hour}")]
    InvalidSleepPreference { field: &'static str, hour: u8 },

    #[error("calendar arithmetic failed: {0}")]
    Time(#[from] jiff::Error),
}

pub type Result<T> = core::result::Result<T, PlanError>;
