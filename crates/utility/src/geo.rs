use itertools::Itertools;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Anything that can be located on the earth's surface in WGS84 decimal degrees.
pub trait Coordinates {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
}

impl Coordinates for (f64, f64) {
    fn latitude(&self) -> f64 {
        self.0
    }

    fn longitude(&self) -> f64 {
        self.1
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometers on a spherical earth.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` slightly above 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two points in meters.
pub fn distance_between<A, B>(a: &A, b: &B) -> f64
where
    A: Coordinates + ?Sized,
    B: Coordinates + ?Sized,
{
    haversine_distance(a.latitude(), a.longitude(), b.latitude(), b.longitude())
        * 1000.0
}

/// Sum of the great-circle distances between consecutive points, in meters.
/// Paths with fewer than two points have no length.
pub fn path_distance<P: Coordinates>(points: &[P]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance_between(a, b))
        .sum()
}

/// Running total of `path_distance` for every prefix of `points`, in meters.
/// The first entry is always `0.0`.
pub fn cumulative_distances<P: Coordinates>(points: &[P]) -> Vec<f64> {
    let mut traveled = 0.0;
    let mut result = Vec::with_capacity(points.len());
    if !points.is_empty() {
        result.push(0.0);
    }
    for (a, b) in points.iter().tuple_windows() {
        traveled += distance_between(a, b);
        result.push(traveled);
    }
    result
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn identical_points_have_no_distance() {
        let point = (54.3233, 10.1228);
        assert_eq!(distance_between(&point, &point), 0.0);
    }

    #[test]
    fn one_hundredth_degree_of_latitude() {
        let meters = distance_between(&(40.0, -74.0), &(40.01, -74.0));
        assert_relative_eq!(meters, 1111.95, epsilon = 0.01);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference_apart() {
        let meters = distance_between(&(0.0, 0.0), &(0.0, 180.0));
        assert_relative_eq!(
            meters,
            std::f64::consts::PI * EARTH_RADIUS_KM * 1000.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn short_paths_have_no_length() {
        let empty: [(f64, f64); 0] = [];
        assert_eq!(path_distance(&empty), 0.0);
        assert_eq!(path_distance(&[(40.0, -74.0)]), 0.0);
    }

    #[test]
    fn path_distance_grows_with_every_point() {
        let points = [
            (40.0, -74.0),
            (40.01, -74.0),
            (40.01, -74.0),
            (40.02, -73.99),
            (40.0, -74.0),
        ];
        let mut previous = 0.0;
        for len in 1..=points.len() {
            let distance = path_distance(&points[..len]);
            assert!(distance >= previous);
            previous = distance;
        }
    }

    #[test]
    fn cumulative_distances_end_at_path_distance() {
        let points = [(40.0, -74.0), (40.01, -74.0), (40.02, -73.99)];
        let cumulative = cumulative_distances(&points);
        assert_eq!(cumulative.len(), 3);
        assert_eq!(cumulative[0], 0.0);
        assert_relative_eq!(cumulative[2], path_distance(&points));
    }
}
