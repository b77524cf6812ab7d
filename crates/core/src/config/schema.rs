//! Configuration schema definitions

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Location provider settings
    #[serde(default)]
    pub location: LocationSection,

    /// Routing service settings
    #[serde(default)]
    pub routing: RoutingSection,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl ConfigSchema {
    /// Check values that parse but cannot work
    ///
    /// # Errors
    /// Returns a `ConfigValidationError` describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> {
            Err(Error::new(ErrorCode::ConfigValidationError, msg))
        };

        if self.location.timeout_ms == 0 {
            return invalid("location.timeout_ms cannot be zero");
        }
        if !self.routing.base_url.starts_with("http://")
            && !self.routing.base_url.starts_with("https://")
        {
            return invalid("routing.base_url must start with http:// or https://");
        }
        if self.routing.profile.trim().is_empty() {
            return invalid("routing.profile cannot be empty");
        }
        if self.routing.timeout_secs == 0 {
            return invalid("routing.timeout_secs cannot be zero");
        }
        Ok(())
    }
}

/// Location provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSection {
    /// How long a cached reading stays fresh, in milliseconds (0 disables the cache)
    #[serde(default = "default_cache_duration_ms")]
    pub cache_duration_ms: u64,

    /// Device fix timeout in milliseconds
    #[serde(default = "default_location_timeout_ms")]
    pub timeout_ms: u64,

    /// Ask the device for its most accurate fix
    #[serde(default = "default_true")]
    pub high_accuracy: bool,

    /// Directory holding the cached location slot (`~` is expanded)
    #[serde(default)]
    pub storage_dir: Option<String>,
}

impl Default for LocationSection {
    fn default() -> Self {
        Self {
            cache_duration_ms: default_cache_duration_ms(),
            timeout_ms: default_location_timeout_ms(),
            high_accuracy: true,
            storage_dir: None,
        }
    }
}

impl LocationSection {
    /// Resolved storage directory
    ///
    /// Falls back to the platform cache directory (`~/.cache/mazeed` on Linux).
    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        match &self.storage_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).into_owned()),
            None => dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from(".cache"))
                .join("mazeed"),
        }
    }
}

fn default_cache_duration_ms() -> u64 {
    300_000
}

fn default_location_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

/// Routing service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingSection {
    /// Base URL of the OSRM-compatible routing service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Routing profile segment of the request path
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Request timeout in seconds
    #[serde(default = "default_routing_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RoutingSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile: default_profile(),
            timeout_secs: default_routing_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_profile() -> String {
    "foot".to_string()
}

fn default_routing_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("mazeed-routing/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySection {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,

    /// Also append logs to this file (`~` is expanded)
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
            log_file: None,
        }
    }
}

impl TelemetrySection {
    /// Log file path with `~` expanded
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
