use serde::Serialize;

use crate::{distance::DistanceEstimate, path::Path, point::GeoPoint};

/// A committed route. Only readable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    path: Path,
    distance: DistanceEstimate,
    start_point: GeoPoint,
    end_point: GeoPoint,
}

impl RouteRecord {
    /// Builds the record for a finished path. Returns `None` for an empty path,
    /// which has neither a start nor an end.
    pub fn new(path: Path, distance: DistanceEstimate) -> Option<Self> {
        let start_point = *path.first()?;
        let end_point = *path.last()?;
        Some(Self {
            path,
            distance,
            start_point,
            end_point,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn distance(&self) -> DistanceEstimate {
        self.distance
    }

    pub fn start_point(&self) -> GeoPoint {
        self.start_point
    }

    pub fn end_point(&self) -> GeoPoint {
        self.end_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_come_from_the_path() {
        let path = Path::from(vec![
            GeoPoint::new(40.0, -74.0),
            GeoPoint::new(40.005, -74.0),
            GeoPoint::new(40.01, -74.0),
        ]);
        let record = RouteRecord::new(path, DistanceEstimate::zero()).unwrap();
        assert_eq!(record.start_point(), GeoPoint::new(40.0, -74.0));
        assert_eq!(record.end_point(), GeoPoint::new(40.01, -74.0));
        assert_eq!(record.path().len(), 3);
    }

    #[test]
    fn single_point_routes_start_and_end_in_the_same_place() {
        let path = Path::starting_at(GeoPoint::new(1.0, 2.0));
        let record = RouteRecord::new(path, DistanceEstimate::zero()).unwrap();
        assert_eq!(record.start_point(), record.end_point());
    }

    #[test]
    fn empty_paths_are_not_routes() {
        assert!(RouteRecord::new(Path::new(), DistanceEstimate::zero()).is_none());
    }
}
