use std::env;

use model::GeoPoint;
use routing::credentials::{ConfigError, MapsApiCredentials};
use serde::{Deserialize, Serialize};

use crate::widget::PolylineStyle;

pub const FINISH_TRIGGER_VAR: &str = "DRAWING_FINISH_TRIGGER";

/// Which event ends a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishTrigger {
    /// A second primary click on the map.
    PointerDown,
    /// The Enter key.
    #[default]
    EnterKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// Measure routes along the road network instead of straight lines.
    pub routed_distance: bool,
    /// Address search.
    pub geocoding: bool,
    /// Offer the GTFS shaped export next to the plain one.
    pub gtfs_export: bool,
}

impl Features {
    /// Straight lines, no search, plain export.
    pub fn minimal() -> Self {
        Self {
            routed_distance: false,
            geocoding: false,
            gtfs_export: false,
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self {
            routed_distance: true,
            geocoding: true,
            gtfs_export: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(40.7128, -74.006),
            zoom: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingConfig {
    /// Without credentials the map refuses to initialize.
    pub credentials: Option<MapsApiCredentials>,
    pub features: Features,
    pub finish_trigger: FinishTrigger,
    pub viewport: Viewport,
    /// Zoom level used when centering on a search result.
    pub search_zoom: u8,
    pub polyline_style: PolylineStyle,
}

impl DrawingConfig {
    pub fn new(credentials: MapsApiCredentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::default()
        }
    }

    /// Reads the maps credentials and the finish trigger from the environment.
    /// A missing API key is not an error here; it is reported when the map is
    /// initialized.
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials = match MapsApiCredentials::env() {
            Ok(credentials) => Some(credentials),
            Err(ConfigError::ConfigurationMissing(_)) => None,
            Err(why) => return Err(why),
        };
        let finish_trigger = match env::var(FINISH_TRIGGER_VAR).ok().as_deref() {
            None => FinishTrigger::default(),
            Some("enter") | Some("enter-key") => FinishTrigger::EnterKey,
            Some("click") | Some("pointer-down") => FinishTrigger::PointerDown,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: FINISH_TRIGGER_VAR,
                    value: other.to_owned(),
                })
            }
        };
        Ok(Self {
            credentials,
            finish_trigger,
            ..Self::default()
        })
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_finish_trigger(mut self, finish_trigger: FinishTrigger) -> Self {
        self.finish_trigger = finish_trigger;
        self
    }
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            features: Features::default(),
            finish_trigger: FinishTrigger::default(),
            viewport: Viewport::default(),
            search_zoom: 15,
            polyline_style: PolylineStyle::default(),
        }
    }
}
