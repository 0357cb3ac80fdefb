//! Turns committed routes into downloadable JSON documents.

use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use model::{GeoPoint, RouteRecord};
use serde::{Deserialize, Serialize};
use utility::{geo, id::Id};

use crate::data_model::{
    agency::Agency,
    routes::{Route, RouteType},
    shapes::{Shape, ShapePoint},
    Color,
};

pub const PLAIN_FILENAME: &str = "drawn-routes.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Point lists with their display distance.
    #[default]
    Plain,
    /// Agency, routes and shapes records shaped after GTFS.
    Gtfs,
}

#[derive(Debug)]
pub enum ExportError {
    JsonError(serde_json::Error),
    IoError(io::Error),
}

impl error::Error for ExportError {}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExportError::JsonError(e) => write!(f, "Could not serialize routes: {}", e),
            ExportError::IoError(e) => write!(f, "Could not write export file: {}", e),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::JsonError(e)
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::IoError(e)
    }
}

/// A serialized export together with the name it should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub filename: String,
    /// Pretty-printed UTF-8 JSON.
    pub contents: String,
}

impl ExportDocument {
    /// Writes the document into `dir` and returns the full path of the file.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.filename);
        fs::write(&path, self.contents.as_bytes())?;
        log::info!("Exported routes to '{}'.", path.display());
        Ok(path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlainExport {
    pub paths: Vec<PlainPath>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlainPath {
    pub points: Vec<GeoPoint>,
    pub distance: String,
}

impl PlainExport {
    pub fn from_routes(routes: &[RouteRecord]) -> Self {
        Self {
            paths: routes
                .iter()
                .map(|route| PlainPath {
                    points: route.path().points().to_vec(),
                    distance: route.distance().display(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GtfsBundle {
    pub agency: Agency,
    pub routes: Vec<Route>,
    pub shapes: Vec<Shape>,
}

impl GtfsBundle {
    /// One route and one shape per committed route, numbered by their 1-based
    /// position in commit order.
    pub fn from_routes(routes: &[RouteRecord]) -> Self {
        let numbered = || routes.iter().enumerate().map(|(index, route)| (index + 1, route));
        Self {
            agency: Agency::demo(),
            routes: numbered()
                .map(|(position, route)| gtfs_route(position, route))
                .collect(),
            shapes: numbered()
                .map(|(position, route)| gtfs_shape(position, route))
                .collect(),
        }
    }
}

fn gtfs_route(position: usize, route: &RouteRecord) -> Route {
    Route {
        id: Id::numbered("ROUTE", position),
        agency_id: None,
        short_name: Some(format!("R{position}")),
        long_name: Some(format!("Route {position}")),
        description: Some(route.distance().display()),
        kind: RouteType::Bus,
        color: Some(Color::red()),
    }
}

fn gtfs_shape(position: usize, route: &RouteRecord) -> Shape {
    let points = route.path().points();
    let traveled = geo::cumulative_distances(points);
    Shape {
        shape_id: Id::numbered("SHAPE", position),
        points: points
            .iter()
            .zip(traveled)
            .enumerate()
            .map(|(index, (point, meters))| ShapePoint {
                latitude: point.lat,
                longitude: point.lng,
                sequence: index as u32 + 1,
                distance_traveled: Some(meters / 1000.0),
            })
            .collect(),
    }
}

pub fn filename(format: ExportFormat, date: NaiveDate) -> String {
    match format {
        ExportFormat::Plain => PLAIN_FILENAME.to_owned(),
        ExportFormat::Gtfs => format!("gtfs-routes-{}.json", date.format("%Y-%m-%d")),
    }
}

/// Serializes `routes` in `format`, dating the file name with `date`.
pub fn serialize_on(
    routes: &[RouteRecord],
    format: ExportFormat,
    date: NaiveDate,
) -> Result<ExportDocument, ExportError> {
    let contents = match format {
        ExportFormat::Plain => serde_json::to_string_pretty(&PlainExport::from_routes(routes))?,
        ExportFormat::Gtfs => serde_json::to_string_pretty(&GtfsBundle::from_routes(routes))?,
    };
    log::debug!("Serialized {} routes as {:?}.", routes.len(), format);
    Ok(ExportDocument {
        filename: filename(format, date),
        contents,
    })
}

/// Serializes `routes` in `format`, dating the file name with today's UTC date.
pub fn serialize(
    routes: &[RouteRecord],
    format: ExportFormat,
) -> Result<ExportDocument, ExportError> {
    serialize_on(routes, format, Utc::now().date_naive())
}
