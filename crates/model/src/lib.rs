pub mod distance;
pub mod path;
pub mod point;
pub mod route;

pub use distance::{DistanceEstimate, Provenance};
pub use path::Path;
pub use point::GeoPoint;
pub use route::RouteRecord;

pub trait ExampleData {
    fn example_data() -> Self;
}

impl ExampleData for Path {
    fn example_data() -> Self {
        // Kiel Hauptbahnhof towards Raisdorf
        Path::from(vec![
            GeoPoint::new(54.3150, 10.1317),
            GeoPoint::new(54.3035, 10.1582),
            GeoPoint::new(54.2941, 10.1960),
            GeoPoint::new(54.2807, 10.2478),
        ])
    }
}
