//! Plan request: the inbound itinerary and preferences.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::RecoveryMode;

/// Usual sleep times as hours of the day (0–23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepPreferences {
    pub normal_bedtime: u8,
    pub normal_wake_time: u8,
}

impl Default for SleepPreferences {
    fn default() -> Self {
        Self {
            normal_bedtime: 22,
            normal_wake_time: 6,
        }
    }
}

impl SleepPreferences {
    /// Hours awake between the usual wake time and bedtime.
    pub fn awake_hours(&self) -> i64 {
        (i64::from(self.normal_bedtime) - i64::from(self.normal_wake_time)).rem_euclid(24)
    }
}

/// Everything needed to generate a plan for a fixed itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// IANA identifier, e.g. `Europe/London`.
    pub origin_timezone: String,

    /// IANA identifier, e.g. `America/New_York`.
    pub destination_timezone: String,
    pub departure: Timestamp,
    pub arrival: Timestamp,
    pub flight_duration_hours: f64,
    #[serde(default)]
    pub sleep: SleepPreferences,
    #[serde(default)]
    pub recovery_mode: RecoveryMode,
}

impl PlanRequest {
    /// Stable identifier for this request: hex SHA-256 of its JSON form.
    ///
    /// Two requests with identical fields share a fingerprint.
    pub fn fingerprint(&self) -> String {
        // Serializing plain data with string keys cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(Sha256::digest(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> PlanRequest {
        PlanRequest {
            origin_timezone: "Europe/London".into(),
            destination_timezone: "America/New_York".into(),
            departure: "2024-06-01T09:00:00Z".parse().unwrap(),
            arrival: "2024-06-01T17:00:00Z".parse().unwrap(),
            flight_duration_hours: 8.0,
            sleep: SleepPreferences::default(),
            recovery_mode: RecoveryMode::Conservative,
        }
    }

    #[test]
    fn awake_hours_wraps_midnight() {
        let late = SleepPreferences {
            normal_bedtime: 1,
            normal_wake_time: 9,
        };
        assert_eq!(late.awake_hours(), 16);
        assert_eq!(SleepPreferences::default().awake_hours(), 16);
    }

    #[test]
    fn fingerprint_is_stable_for_identical_requests() {
        let a = sample_request();
        let b = sample_request();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn fingerprint_changes_with_mode() {
        let a = sample_request();
        let mut b = sample_request();
        b.recovery_mode = RecoveryMode::Aggressive;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn missing_sleep_and_mode_use_defaults() {
        let json = r#"{
            "originTimezone": "Asia/Taipei",
            "destinationTimezone": "America/Vancouver",
            "departure": "2024-06-01T12:00:00Z",
            "arrival": "2024-06-01T23:00:00Z",
            "flightDurationHours": 11.0
        }"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.sleep, SleepPreferences::default());
        assert_eq!(request.recovery_mode, RecoveryMode::Conservative);
    }
}
