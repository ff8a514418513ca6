// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tunable engine settings, loaded from TOML
//!
//! ```toml
//! cooldown = "5m"
//! debounce = "500ms"
//! alert_distance_miles = 3.0
//! location_timeout = "250ms"
//! ```

use crate::bucket_list::DEFAULT_ALERT_DISTANCE_MILES;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Minimum time between two notifications for the same region
pub const DEFAULT_NOTIFICATION_COOLDOWN: Duration = Duration::from_secs(5 * 60);

/// Quiet period before a burst of tracking changes is applied
pub const DEFAULT_SYNC_DEBOUNCE: Duration = Duration::from_millis(500);

/// Longest wait for a last-known position when building a notification
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeofenceSettings {
    #[serde(with = "humantime_serde")]
    pub cooldown: Duration,
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
    /// Initial alert distance until the user picks one
    pub alert_distance_miles: f64,
    #[serde(with = "humantime_serde")]
    pub location_timeout: Duration,
}

impl Default for GeofenceSettings {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_NOTIFICATION_COOLDOWN,
            debounce: DEFAULT_SYNC_DEBOUNCE,
            alert_distance_miles: DEFAULT_ALERT_DISTANCE_MILES,
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
        }
    }
}

impl GeofenceSettings {
    /// Parse settings from TOML text; omitted keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alert_distance_miles.is_finite() && self.alert_distance_miles > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "alert_distance_miles must be positive, got {}",
                self.alert_distance_miles
            )));
        }
        if self.cooldown.is_zero() {
            return Err(ConfigError::Invalid("cooldown must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
