//! Human-readable distance and duration strings.

use crate::{haversine_distance_meters, Coordinate};
use serde::{Deserialize, Serialize};

const METERS_PER_KM: f64 = 1000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;
const MINUTES_PER_HOUR: u64 = 60;

/// Formats a distance in meters.
///
/// Below one kilometer the value is rounded to whole meters (`"999m"`),
/// otherwise it is shown in kilometers with one decimal (`"2.5km"`).
/// Kilometers round to the nearest tenth of the exact binary value, so
/// 1150 m (stored just below 1.15 km) renders as `"1.1km"`; exact ties such
/// as 1250 m round up to `"1.3km"`.
///
/// # Example
/// ```
/// use mazeed_geo::format_distance;
///
/// assert_eq!(format_distance(999.0), "999m");
/// assert_eq!(format_distance(1000.0), "1.0km");
/// ```
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < METERS_PER_KM {
        format!("{}m", meters.round())
    } else {
        format!("{:.1}km", round_ties_up(meters / METERS_PER_KM))
    }
}

// `{:.1}` breaks exact ties to even; nudge them up. One-decimal ties are
// exactly representable only at odd multiples of 0.25.
fn round_ties_up(km: f64) -> f64 {
    let quarters = km * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        km + 0.05
    } else {
        km
    }
}

/// Formats a duration in seconds.
///
/// Seconds are converted to whole minutes rounding up, so any partial minute
/// counts as a full one. Under an hour renders as `"N min"`, otherwise as
/// `"Hh Mm"`.
///
/// # Example
/// ```
/// use mazeed_geo::format_duration;
///
/// assert_eq!(format_duration(59.0), "1 min");
/// assert_eq!(format_duration(3660.0), "1h 1m");
/// ```
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    // Saturating cast: negative and NaN inputs become zero minutes.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (seconds / SECONDS_PER_MINUTE).ceil() as u64;

    if minutes < MINUTES_PER_HOUR {
        format!("{minutes} min")
    } else {
        format!("{}h {}m", minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
    }
}

/// Straight-line distance shown when no walking route is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightLine {
    /// Great-circle distance in meters
    pub distance_meters: f64,
    /// `distance_meters` rendered with [`format_distance`]
    pub formatted: String,
}

/// Computes the straight-line fallback between two coordinates.
#[must_use]
pub fn straight_line(from: &Coordinate, to: &Coordinate) -> StraightLine {
    let distance_meters = haversine_distance_meters(from, to);
    StraightLine {
        distance_meters,
        formatted: format_distance(distance_meters),
    }
}
