//! Device location port
//!
//! The host (browser shim, mobile bridge, GPS daemon, or a fixed position for
//! the CLI) implements [`DeviceLocator`]. The provider never talks to
//! hardware directly.

use async_trait::async_trait;
use mazeed_geo::Coordinate;
use std::time::Duration;
use thiserror::Error;

/// Default device fix timeout
pub const DEFAULT_POSITION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Options for a single position request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Prefer the most accurate source (GPS over cell/wifi)
    pub enable_high_accuracy: bool,
    /// Give up after this long
    pub timeout: Duration,
    /// Oldest OS-level cached fix the device may return; zero forces a new fix
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: DEFAULT_POSITION_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

impl PositionOptions {
    /// Set the fix timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the accuracy hint
    #[must_use]
    pub fn with_high_accuracy(mut self, enabled: bool) -> Self {
        self.enable_high_accuracy = enabled;
        self
    }
}

/// Why the device could not produce a fix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The user or OS refused location access
    #[error("Location permission denied: {0}")]
    PermissionDenied(String),

    /// No fix could be obtained (no signal, hardware error)
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// No fix arrived within the allowed time
    #[error("Timed out after {0:?} waiting for a position fix")]
    Timeout(Duration),
}

/// Source of device position fixes
#[async_trait]
pub trait DeviceLocator: Send + Sync {
    /// Obtain the current position honouring `options`
    async fn current_position(&self, options: &PositionOptions)
        -> Result<Coordinate, PositionError>;
}

/// Locator that always reports the same position
///
/// Used when the position is known up front, e.g. passed on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    coordinate: Coordinate,
}

impl FixedLocator {
    /// Report `coordinate` for every request
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl DeviceLocator for FixedLocator {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, PositionError> {
        Ok(self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_force_fresh_high_accuracy_fix() {
        let options = PositionOptions::default();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout, Duration::from_millis(5000));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }

    #[test]
    fn test_options_builder() {
        let options = PositionOptions::default()
            .with_timeout(Duration::from_secs(2))
            .with_high_accuracy(false);
        assert_eq!(options.timeout, Duration::from_secs(2));
        assert!(!options.enable_high_accuracy);
    }

    #[tokio::test]
    async fn test_fixed_locator() {
        let locator = FixedLocator::new(Coordinate::new(21.4858, 39.1925));
        let coord = locator
            .current_position(&PositionOptions::default())
            .await
            .unwrap();
        assert_eq!(coord, Coordinate::new(21.4858, 39.1925));
    }

    #[test]
    fn test_position_error_messages() {
        let err = PositionError::Timeout(Duration::from_millis(5000));
        assert_eq!(err.to_string(), "Timed out after 5s waiting for a position fix");
    }
}
