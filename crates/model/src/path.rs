use serde::{Deserialize, Serialize};
use utility::geo;

use crate::point::GeoPoint;

/// The vertices of one drawn route in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    points: Vec<GeoPoint>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(point: GeoPoint) -> Self {
        Self {
            points: vec![point],
        }
    }

    pub fn push(&mut self, point: GeoPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.points.last()
    }

    /// Straight-line length in meters.
    pub fn straight_line_distance(&self) -> f64 {
        geo::path_distance(&self.points)
    }
}

impl From<Vec<GeoPoint>> for Path {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<GeoPoint> for Path {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
