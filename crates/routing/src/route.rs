//! Normalised walking route

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A walking route between two points
///
/// `distance` and `duration` are always finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Route shape as returned by the service (GeoJSON `LineString`)
    pub geometry: Value,
    /// Length in meters
    pub distance: f64,
    /// Expected walking time in seconds
    pub duration: f64,
    /// Turn-by-turn steps of the first leg, in order
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Number of turn-by-turn steps
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

/// One turn-by-turn instruction, exactly as the service sent it
///
/// The step is kept as raw JSON and serialises back unchanged. Accessors
/// read the common OSRM fields and return `None` when a field is missing
/// or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteStep(Value);

impl RouteStep {
    /// Raw step object
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the raw step object
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Step length in meters
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        self.0.get("distance").and_then(Value::as_f64)
    }

    /// Step duration in seconds
    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        self.0.get("duration").and_then(Value::as_f64)
    }

    /// Street name; `None` for unnamed ways
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Manoeuvre type, e.g. `depart`, `turn`, `arrive`
    #[must_use]
    pub fn maneuver_type(&self) -> Option<&str> {
        self.maneuver_field("type")
    }

    /// Direction hint, e.g. `left`, `slight right`
    #[must_use]
    pub fn modifier(&self) -> Option<&str> {
        self.maneuver_field("modifier")
    }

    fn maneuver_field(&self, field: &str) -> Option<&str> {
        self.0
            .get("maneuver")
            .and_then(|m| m.get(field))
            .and_then(Value::as_str)
    }

    /// Short human-readable instruction, e.g. `turn left onto King Fahd Road`
    #[must_use]
    pub fn instruction(&self) -> String {
        let mut text = self
            .maneuver_type()
            .map_or_else(|| "continue".to_string(), |kind| kind.replace('_', " "));
        if let Some(modifier) = self.modifier() {
            text.push(' ');
            text.push_str(modifier);
        }
        if let Some(name) = self.name() {
            text.push_str(" onto ");
            text.push_str(name);
        }
        text
    }
}

impl From<Value> for RouteStep {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
