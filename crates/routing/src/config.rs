//! Configuration for the route resolver
//!
//! Defaults target the public OSRM demo server with the walking profile.
//! Values can come from the `[routing]` config section and be overridden
//! from the environment.

use crate::error::{RoutingError, RoutingResult};
use mazeed_core::config::RoutingSection;
use std::env;
use std::time::Duration;

/// Default routing service
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default routing profile
pub const DEFAULT_PROFILE: &str = "foot";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent for routing requests
pub const DEFAULT_USER_AGENT: &str = concat!("mazeed-routing/", env!("CARGO_PKG_VERSION"));

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingConfig {
    /// Base URL of the OSRM-compatible service
    pub base_url: String,
    /// Profile segment of the route path
    pub profile: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// User agent header value
    pub user_agent: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&RoutingSection> for RoutingConfig {
    fn from(section: &RoutingSection) -> Self {
        Self {
            base_url: section.base_url.clone(),
            profile: section.profile.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
            user_agent: section.user_agent.clone(),
        }
    }
}

impl RoutingConfig {
    /// Create configuration from defaults plus environment overrides
    ///
    /// # Errors
    /// See [`RoutingConfig::with_env_overrides`].
    pub fn from_env() -> RoutingResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides
    ///
    /// Reads the following environment variables:
    /// - `MAZEED_ROUTING_URL`: base URL
    /// - `MAZEED_ROUTING_PROFILE`: routing profile
    /// - `MAZEED_ROUTING_TIMEOUT_SECS`: request timeout in seconds
    ///
    /// # Errors
    /// Returns [`RoutingError::Config`] if the timeout is not a whole number.
    pub fn with_env_overrides(mut self) -> RoutingResult<Self> {
        if let Ok(url) = env::var("MAZEED_ROUTING_URL") {
            self.base_url = url;
        }
        if let Ok(profile) = env::var("MAZEED_ROUTING_PROFILE") {
            self.profile = profile;
        }
        if let Ok(secs) = env::var("MAZEED_ROUTING_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                RoutingError::config(format!(
                    "MAZEED_ROUTING_TIMEOUT_SECS must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set profile
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns [`RoutingError::Config`] describing the first invalid field.
    pub fn validate(&self) -> RoutingResult<()> {
        if self.base_url.is_empty() {
            return Err(RoutingError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(RoutingError::config(
                "base_url must start with http:// or https://",
            ));
        }

        if self.profile.trim().is_empty() {
            return Err(RoutingError::config("profile cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(RoutingError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
