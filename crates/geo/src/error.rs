//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    /// Coordinate text could not be parsed
    #[error("Invalid coordinate format: {0}")]
    InvalidFormat(String),

    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Error code for integration with mazeed-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Coordinate text could not be parsed
    InvalidFormat = 10001,
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
}

impl GeoError {
    /// Returns the error code for this error.
    #[must_use]
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidFormat(_) => GeoErrorCode::InvalidFormat,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
        }
    }
}
