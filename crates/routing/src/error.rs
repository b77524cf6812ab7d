//! Error types for the route resolver

use mazeed_core::{Error, ErrorCode};
use thiserror::Error;

/// Result type alias for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;

/// Why no walking route could be produced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// Connection-level failure (DNS, refused, reset)
    #[error("Network error requesting {url}: {message}")]
    Network {
        /// Request URL
        url: String,
        /// Transport error description
        message: String,
    },

    /// No response within the configured timeout
    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL
        url: String,
        /// Configured timeout
        timeout_secs: u64,
    },

    /// The service answered with a non-success status
    #[error("Routing service returned HTTP {status} for {url}")]
    Http {
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The body was not a valid route response
    #[error("Malformed routing response: {message}")]
    Parse {
        /// Decoder error description
        message: String,
    },

    /// The service reported a failure code
    #[error("Routing service error {code}: {message}")]
    Service {
        /// Service status code, e.g. `NoRoute` or `InvalidQuery`
        code: String,
        /// Service-provided message, possibly empty
        message: String,
    },

    /// The service answered `Ok` but listed no routes
    #[error("No route found")]
    NoRoute,

    /// The first route carries an impossible distance or duration
    #[error("Route has invalid {field}: {value}")]
    InvalidRoute {
        /// `distance` or `duration`
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The caller cancelled the request
    #[error("Route request cancelled")]
    Cancelled,

    /// Invalid resolver configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RoutingError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a service error
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Error code for integration with mazeed-core error handling
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::Config(_) => ErrorCode::ConfigValidationError,
            Self::NoRoute => ErrorCode::RouteNotFound,
            Self::Service { code, .. } if code == "NoRoute" => ErrorCode::RouteNotFound,
            Self::Network { .. }
            | Self::Http { .. }
            | Self::Parse { .. }
            | Self::Service { .. }
            | Self::InvalidRoute { .. }
            | Self::Cancelled => ErrorCode::RoutingError,
        }
    }

    /// Whether the request might succeed if simply repeated
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Parse { .. }
            | Self::Service { .. }
            | Self::NoRoute
            | Self::InvalidRoute { .. }
            | Self::Cancelled
            | Self::Config(_) => false,
        }
    }
}

impl From<RoutingError> for Error {
    fn from(err: RoutingError) -> Self {
        let core = Error::new(err.code(), err.to_string());
        match &err {
            RoutingError::Config(_) => {
                core.with_suggestion("Check the [routing] section or MAZEED_ROUTING_* variables")
            }
            e if e.is_transient() => core.with_suggestion("Try again in a moment"),
            _ => core,
        }
    }
}
