//! Application configuration model.
//!
//! Every section has defaults, so an empty or missing config file is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrokeRiskError};
use crate::hospital::Coordinates;
use crate::scan::RiskThresholds;
use crate::session::DEFAULT_SIGN_IN_ROUTE;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub mock: MockSettings,
    #[serde(default)]
    pub risk: RiskThresholds,
    #[serde(default)]
    pub emergency: EmergencySettings,
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Where the session gate sends unauthenticated visitors.
    #[serde(default = "default_sign_in_route")]
    pub sign_in_route: String,
}

fn default_sign_in_route() -> String {
    DEFAULT_SIGN_IN_ROUTE.to_string()
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            sign_in_route: default_sign_in_route(),
        }
    }
}

/// Artificial latencies of the in-process mock collaborators, in ms.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct MockSettings {
    pub auth_latency_ms: u64,
    pub sign_out_latency_ms: u64,
    pub profile_read_latency_ms: u64,
    pub profile_write_latency_ms: u64,
    pub scan_latency_ms: u64,
    pub hospital_latency_ms: u64,
    pub history_latency_ms: u64,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            auth_latency_ms: 1000,
            sign_out_latency_ms: 500,
            profile_read_latency_ms: 500,
            profile_write_latency_ms: 1000,
            scan_latency_ms: 2000,
            hospital_latency_ms: 1000,
            history_latency_ms: 500,
        }
    }
}

impl MockSettings {
    /// All latencies set to zero.
    pub fn instant() -> Self {
        Self {
            auth_latency_ms: 0,
            sign_out_latency_ms: 0,
            profile_read_latency_ms: 0,
            profile_write_latency_ms: 0,
            scan_latency_ms: 0,
            hospital_latency_ms: 0,
            history_latency_ms: 0,
        }
    }

    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    pub fn sign_out_latency(&self) -> Duration {
        Duration::from_millis(self.sign_out_latency_ms)
    }

    pub fn profile_read_latency(&self) -> Duration {
        Duration::from_millis(self.profile_read_latency_ms)
    }

    pub fn profile_write_latency(&self) -> Duration {
        Duration::from_millis(self.profile_write_latency_ms)
    }

    pub fn scan_latency(&self) -> Duration {
        Duration::from_millis(self.scan_latency_ms)
    }

    pub fn hospital_latency(&self) -> Duration {
        Duration::from_millis(self.hospital_latency_ms)
    }

    pub fn history_latency(&self) -> Duration {
        Duration::from_millis(self.history_latency_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EmergencySettings {
    #[serde(default = "default_emergency_number")]
    pub phone_number: String,
}

fn default_emergency_number() -> String {
    "108".to_string()
}

impl Default for EmergencySettings {
    fn default() -> Self {
        Self {
            phone_number: default_emergency_number(),
        }
    }
}

/// Fallback location for the hospital finder when none is given.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LocationSettings {
    pub lat: f64,
    pub lng: f64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            lat: 40.7128,
            lng: -74.0060,
        }
    }
}

impl LocationSettings {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Connection settings of a hosted identity backend.
///
/// Not needed by the in-process mock; read from `STROKERISK_AUTH_*`
/// environment variables when a real backend is wired in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthProviderConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl AuthProviderConfig {
    pub const ENV_VARS: [&'static str; 6] = [
        "STROKERISK_AUTH_API_KEY",
        "STROKERISK_AUTH_AUTH_DOMAIN",
        "STROKERISK_AUTH_PROJECT_ID",
        "STROKERISK_AUTH_STORAGE_BUCKET",
        "STROKERISK_AUTH_MESSAGING_SENDER_ID",
        "STROKERISK_AUTH_APP_ID",
    ];

    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, reporting every missing
    /// variable at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let values: Vec<Option<String>> = Self::ENV_VARS
            .iter()
            .map(|key| lookup(key).filter(|v| !v.is_empty()))
            .collect();

        let missing: Vec<&str> = Self::ENV_VARS
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| *k)
            .collect();

        if !missing.is_empty() {
            return Err(StrokeRiskError::config(format!(
                "Missing auth provider env vars: {}",
                missing.join(", ")
            )));
        }

        let mut values = values.into_iter().flatten();
        let mut next = || values.next().unwrap_or_default();
        Ok(Self {
            api_key: next(),
            auth_domain: next(),
            project_id: next(),
            storage_bucket: next(),
            messaging_sender_id: next(),
            app_id: next(),
        })
    }
}
