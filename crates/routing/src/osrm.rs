//! OSRM API response types for the Route service.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use crate::route::RouteStep;
use serde::Deserialize;
use serde_json::Value;

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the points
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"TooBig"` - Request exceeds server limits
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One candidate route.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Route shape; GeoJSON when requested with `geometries=geojson`.
    #[serde(default)]
    pub geometry: Value,
    /// Length in meters.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// One leg per pair of consecutive waypoints.
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

/// Route between two consecutive waypoints.
#[derive(Debug, Deserialize)]
pub struct OsrmLeg {
    /// Turn-by-turn steps, present when requested with `steps=true`.
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {"type": "LineString", "coordinates": [[46.6, 24.7], [46.7, 24.8]]},
                "distance": 1523.4,
                "duration": 1096.9,
                "legs": [{"steps": [{"name": "Tahlia Street", "maneuver": {"type": "depart"}}]}]
            }],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0].distance, 1523.4);
        assert_eq!(response.routes[0].legs[0].steps[0].name(), Some("Tahlia Street"));
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.message.as_deref(),
            Some("Impossible route between points")
        );
        assert!(response.routes.is_empty());
    }

    #[test]
    fn deserialise_route_without_legs() {
        let json = r#"{"code": "Ok", "routes": [{"geometry": null, "distance": 0, "duration": 0}]}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.routes[0].legs.is_empty());
        assert!(response.routes[0].geometry.is_null());
    }

    #[test]
    fn deserialise_step_with_null_name() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 12,
                "duration": 9,
                "legs": [{"steps": [{"name": null, "maneuver": {"type": "arrive"}}]}]
            }]
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        let step = &response.routes[0].legs[0].steps[0];
        assert_eq!(step.name(), None);
        assert_eq!(step.as_value()["name"], serde_json::Value::Null);
    }

    #[test]
    fn missing_distance_is_rejected() {
        let json = r#"{"code": "Ok", "routes": [{"duration": 10}]}"#;
        assert!(serde_json::from_str::<RouteResponse>(json).is_err());
    }
}
