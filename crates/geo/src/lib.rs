//! Geospatial math and formatting for Mazeed.
//!
//! This crate provides:
//! - Haversine great-circle distance
//! - Human-readable distance and duration strings
//! - The straight-line fallback shown when no walking route is available
//!
//! # Example
//!
//! ```
//! use mazeed_geo::{format_distance, haversine_distance_meters, Coordinate};
//!
//! let riyadh = Coordinate::new(24.7136, 46.6753);
//! let diriyah = Coordinate::new(24.7340, 46.5750);
//!
//! let meters = haversine_distance_meters(&riyadh, &diriyah);
//! assert_eq!(format_distance(meters), "10.4km");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod format;
mod haversine;

use std::fmt;
use std::str::FromStr;

pub use error::{GeoError, GeoErrorCode, Result};
pub use format::{format_distance, format_duration, straight_line, StraightLine};
pub use haversine::{haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lng"` (whitespace around either part is ignored).
impl FromStr for Coordinate {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| GeoError::InvalidFormat(format!("expected \"lat,lng\", got \"{s}\"")))?;

        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| GeoError::InvalidFormat(format!("latitude is not a number: \"{lat}\"")))?;
        let longitude: f64 = lng
            .trim()
            .parse()
            .map_err(|_| GeoError::InvalidFormat(format!("longitude is not a number: \"{lng}\"")))?;

        let coord = Self::new(latitude, longitude);
        if !coord.is_valid() {
            return Err(GeoError::InvalidCoordinate(format!(
                "{coord} is outside the valid latitude/longitude range"
            )));
        }
        Ok(coord)
    }
}
