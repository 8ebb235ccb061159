//! Jetlag configuration.
//!
//! Loaded from `~/.jetlag/config.toml`. Every key is optional; a missing
//! file means built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{RecoveryMode, SleepPreferences};

/// Jetlag configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Usual bedtime, hour of the day (0–23).
    pub bedtime: Option<u8>,

    /// Usual wake time, hour of the day (0–23).
    pub wake_time: Option<u8>,

    /// Recovery policy used when `--mode` is not given.
    pub recovery_mode: Option<RecoveryMode>,
}

impl Config {
    /// Load config from `~/.jetlag/config.toml`.
    /// Returns defaults if the file is missing, an error if it is invalid.
    pub fn load() -> Result<Self, String> {
        let path = Self::path().ok_or("could not determine home directory")?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.jetlag/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".jetlag").join("config.toml"))
    }

    /// Sleep preferences: flag, then config, then default.
    pub fn sleep(&self, bedtime: Option<u8>, wake_time: Option<u8>) -> SleepPreferences {
        let defaults = SleepPreferences::default();
        SleepPreferences {
            normal_bedtime: bedtime.or(self.bedtime).unwrap_or(defaults.normal_bedtime),
            normal_wake_time: wake_time
                .or(self.wake_time)
                .unwrap_or(defaults.normal_wake_time),
        }
    }

    /// Recovery mode: flag, then config, then default.
    pub fn mode(&self, flag: Option<RecoveryMode>) -> RecoveryMode {
        flag.or(self.recovery_mode).unwrap_or_default()
    }
}
