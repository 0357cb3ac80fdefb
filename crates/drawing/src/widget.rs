use model::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::overlay::OverlayHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Enter,
    Escape,
    Character(char),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineStyle {
    /// CSS color, e.g. `#FF0000`.
    pub stroke_color: String,
    pub stroke_opacity: f32,
    pub stroke_weight: u32,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#FF0000".to_owned(),
            stroke_opacity: 1.0,
            stroke_weight: 3,
        }
    }
}

/// The interactive map the routes are drawn on.
///
/// Pointer and key events travel the other way: whoever hosts the widget feeds
/// them into the [`crate::MapController`].
pub trait MapWidget {
    /// Start delivering pointer-move events.
    fn listen_pointer_moves(&mut self);

    /// Stop delivering pointer-move events. Must be harmless when not listening.
    fn stop_listening_pointer_moves(&mut self);

    fn create_polyline(&mut self, points: &[GeoPoint], style: &PolylineStyle) -> OverlayHandle;

    fn set_polyline_path(&mut self, overlay: OverlayHandle, points: &[GeoPoint]);

    fn place_marker(&mut self, position: GeoPoint, title: &str) -> OverlayHandle;

    fn remove_overlay(&mut self, overlay: OverlayHandle);

    fn set_viewport(&mut self, center: GeoPoint, zoom: u8);

    /// Show a message to the operator.
    fn notify(&mut self, message: &str);
}
