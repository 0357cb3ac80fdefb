use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use super::{Latitude, Longitude};

pub type ShapeId = Id<Shape>;

/// The drawn geometry of a route.
///
/// Unlike shapes.txt, where every point is a row carrying its `shape_id`, the
/// points are nested below their shape here.
///
/// See <https://gtfs.org/schedule/reference/#shapestxt>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub shape_id: ShapeId,

    pub points: Vec<ShapePoint>,
}

impl HasId for Shape {
    type IdType = String;
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapePoint {
    #[serde(rename = "shape_pt_lat")]
    pub latitude: Latitude,

    #[serde(rename = "shape_pt_lon")]
    pub longitude: Longitude,

    /// 1-based drawing order.
    #[serde(rename = "shape_pt_sequence")]
    pub sequence: u32,

    /// Kilometers from the first point, never decreasing along the sequence.
    #[serde(rename = "shape_dist_traveled")]
    pub distance_traveled: Option<f64>,
}
