//! Error types for the location provider

use crate::device::PositionError;
use mazeed_core::{Error, ErrorCode};
use thiserror::Error;

/// Result type alias for location operations
pub type LocationResult<T> = Result<T, LocationError>;

/// Why the current location could not be determined
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The host has no device location capability installed
    #[error("Geolocation is not supported on this host")]
    CapabilityUnavailable,

    /// The device was asked but produced no fix
    #[error("Unable to retrieve location: {source}")]
    LocationUnavailable {
        /// Underlying device failure
        #[source]
        source: PositionError,
    },
}

impl LocationError {
    /// Error code for integration with mazeed-core error handling
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::CapabilityUnavailable => ErrorCode::CapabilityUnavailable,
            Self::LocationUnavailable { .. } => ErrorCode::LocationUnavailable,
        }
    }

    /// Whether the user can fix this by granting location permission
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::LocationUnavailable {
                source: PositionError::PermissionDenied(_)
            }
        )
    }
}

impl From<PositionError> for LocationError {
    fn from(source: PositionError) -> Self {
        Self::LocationUnavailable { source }
    }
}

impl From<LocationError> for Error {
    fn from(err: LocationError) -> Self {
        let suggestion = match &err {
            LocationError::CapabilityUnavailable => {
                "Provide a position explicitly or run on a host with location support"
            }
            LocationError::LocationUnavailable { source } => match source {
                PositionError::PermissionDenied(_) => "Grant location permission and try again",
                PositionError::PositionUnavailable(_) => "Move to an area with better signal",
                PositionError::Timeout(_) => "Increase location.timeout_ms in the configuration",
            },
        };
        Error::new(err.code(), err.to_string())
            .with_suggestion(suggestion)
            .with_source(err)
    }
}
