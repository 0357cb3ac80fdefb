use std::fmt;

use serde::{Deserialize, Serialize};

/// How a distance estimate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Road network distance reported by the routing service.
    Routed,
    /// Great-circle distance over the drawn vertices.
    StraightLine,
}

/// Length of a path in meters together with where the number came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceEstimate {
    meters: f64,
    provenance: Provenance,
}

impl DistanceEstimate {
    pub fn new(meters: f64, provenance: Provenance) -> Self {
        Self {
            meters: meters.max(0.0),
            provenance,
        }
    }

    pub fn zero() -> Self {
        Self::straight_line(0.0)
    }

    pub fn routed(meters: f64) -> Self {
        Self::new(meters, Provenance::Routed)
    }

    pub fn straight_line(meters: f64) -> Self {
        Self::new(meters, Provenance::StraightLine)
    }

    pub fn meters(&self) -> f64 {
        self.meters
    }

    pub fn kilometers(&self) -> f64 {
        self.meters / 1000.0
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Kilometers with two decimals, e.g. `"1.11 km"`. Downstream consumers of
    /// the export files parse this exact format.
    pub fn display(&self) -> String {
        format!("{:.2} km", self.kilometers())
    }
}

impl Default for DistanceEstimate {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for DistanceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_to_two_decimals() {
        assert_eq!(DistanceEstimate::routed(1111.95).display(), "1.11 km");
        assert_eq!(DistanceEstimate::straight_line(12_345.0).display(), "12.35 km");
        assert_eq!(DistanceEstimate::zero().display(), "0.00 km");
    }

    #[test]
    fn negative_distances_are_clamped() {
        assert_eq!(DistanceEstimate::routed(-3.0).meters(), 0.0);
    }
}
