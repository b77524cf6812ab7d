//! Route resolver implementation

use crate::config::RoutingConfig;
use crate::error::{RoutingError, RoutingResult};
use crate::osrm::RouteResponse;
use crate::route::Route;
use mazeed_geo::Coordinate;
use mazeed_telemetry::{metrics, names, Timer};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn, Span};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Walking route resolver
///
/// [`RouteResolver::get_walking_route`] never fails: any problem with the
/// routing service is logged and reported as `None`, so the caller can fall
/// back to a straight-line estimate. Use
/// [`RouteResolver::try_walking_route`] to see why a route is missing.
///
/// Requests are made exactly once; there is no retry.
#[derive(Clone)]
pub struct RouteResolver {
    inner: Client,
    config: Arc<RoutingConfig>,
}

impl RouteResolver {
    /// Create a resolver from defaults plus environment overrides
    ///
    /// # Errors
    /// Returns [`RoutingError::Config`] for invalid configuration or if the
    /// HTTP client cannot be built.
    pub fn new() -> RoutingResult<Self> {
        Self::with_config(RoutingConfig::from_env()?)
    }

    /// Create a resolver with specific configuration
    ///
    /// # Errors
    /// Returns [`RoutingError::Config`] for invalid configuration or if the
    /// HTTP client cannot be built.
    pub fn with_config(config: RoutingConfig) -> RoutingResult<Self> {
        config.validate()?;

        let inner = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RoutingError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Build the route URL for a pair of points
    ///
    /// The service expects `lng,lat` order.
    #[must_use]
    pub fn build_route_url(&self, start: Coordinate, end: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson&steps=true",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            start.longitude,
            start.latitude,
            end.longitude,
            end.latitude,
        )
    }

    /// Resolve a walking route, or `None` if the service cannot provide one
    pub async fn get_walking_route(&self, start: Coordinate, end: Coordinate) -> Option<Route> {
        settle(self.try_walking_route(start, end).await)
    }

    /// Like [`RouteResolver::get_walking_route`], abandoning the request
    /// when `cancel` fires
    pub async fn get_walking_route_with_cancel(
        &self,
        start: Coordinate,
        end: Coordinate,
        cancel: &CancellationToken,
    ) -> Option<Route> {
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(RoutingError::Cancelled),
            result = self.try_walking_route(start, end) => result,
        };
        settle(result)
    }

    /// Resolve a walking route, reporting why it failed
    ///
    /// # Errors
    /// Returns a [`RoutingError`] describing the transport, HTTP, decoding or
    /// service failure.
    #[instrument(skip(self), fields(request_id))]
    pub async fn try_walking_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> RoutingResult<Route> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let url = self.build_route_url(start, end);
        let timer = Timer::start(names::ROUTING_REQUEST_MS);

        let mut request = self
            .inner
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            request = request.header(X_REQUEST_ID, value);
        }

        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::Http {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let elapsed = timer.stop();

        debug!(
            request_id = %request_id,
            elapsed_ms = elapsed.as_millis(),
            bytes = body.len(),
            "Routing service answered"
        );

        let parsed: RouteResponse =
            serde_json::from_str(&body).map_err(|err| RoutingError::Parse {
                message: err.to_string(),
            })?;

        convert_response(parsed)
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }

        RoutingError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Debug for RouteResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Swallow a routing failure into `None`, logging it.
fn settle(result: RoutingResult<Route>) -> Option<Route> {
    match result {
        Ok(route) => {
            metrics().increment(names::ROUTING_RESOLVED);
            Some(route)
        }
        Err(err) => {
            metrics().increment(names::ROUTING_FALLBACK);
            warn!(error = %err, "Walking route unavailable");
            None
        }
    }
}

/// Convert an OSRM response to a `Route`.
///
/// Only the first route and its first leg are used.
pub(crate) fn convert_response(response: RouteResponse) -> RoutingResult<Route> {
    if !response.is_ok() {
        return Err(RoutingError::service(
            response.code,
            response.message.unwrap_or_default(),
        ));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute)?;

    check_measure("distance", route.distance)?;
    check_measure("duration", route.duration)?;

    let steps = route
        .legs
        .into_iter()
        .next()
        .map(|leg| leg.steps)
        .unwrap_or_default();

    Ok(Route {
        geometry: route.geometry,
        distance: route.distance,
        duration: route.duration,
        steps,
    })
}

fn check_measure(field: &'static str, value: f64) -> RoutingResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(RoutingError::InvalidRoute { field, value })
    }
}
