use std::error;
use std::fmt;

pub mod collection;
pub mod config;
pub mod controller;
pub mod overlay;
pub mod session;
pub mod widget;

pub use collection::RouteCollection;
pub use config::{DrawingConfig, Features, FinishTrigger, Viewport};
pub use controller::{EventOutcome, MapController, RouteDetails, Services};
pub use overlay::{OverlayHandle, OverlayKind, OverlayRegistry};
pub use session::{DistanceTicket, DrawingSession, Status};
pub use widget::{Key, MapWidget, PointerButton, PolylineStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawingError {
    /// The event needs a route in progress, but the session is idle.
    NotDrawing,
    AlreadyDrawing,
    /// The finished path is too short to be a route.
    DegenerateRoute { points: usize },
}

impl error::Error for DrawingError {}

impl fmt::Display for DrawingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DrawingError::NotDrawing => write!(f, "No route is being drawn."),
            DrawingError::AlreadyDrawing => write!(f, "A route is already being drawn."),
            DrawingError::DegenerateRoute { points } => {
                write!(f, "A route needs at least two points, got {}.", points)
            }
        }
    }
}
