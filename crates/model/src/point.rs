use std::fmt;

use serde::{Deserialize, Serialize};
use utility::geo::{self, Coordinates};

/// A WGS84 coordinate pair in decimal degrees, as reported by the map widget for
/// a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        geo::distance_between(self, other)
    }
}

impl Coordinates for GeoPoint {
    fn latitude(&self) -> f64 {
        self.lat
    }

    fn longitude(&self) -> f64 {
        self.lng
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}
