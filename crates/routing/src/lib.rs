use std::error;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use model::GeoPoint;
use serde::{Deserialize, Serialize};

pub mod client;
pub mod credentials;
pub mod finder;
pub mod geocoding;
pub mod response;

pub use finder::RouteFinder;
pub use geocoding::{GeocodeCandidate, Geocoder, GeocodingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
}

impl TravelMode {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
        }
    }
}

/// Looks up the road network distance between two points.
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Total distance of the route from `origin` to `destination` in meters.
    async fn route_distance(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
    ) -> Result<f64, RoutingError>;
}

#[derive(Debug, Clone)]
pub enum RoutingError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    /// The service answered, but not with `OK`.
    InvalidStatus {
        status: String,
        message: Option<String>,
    },
    NoRoute,
    Timeout,
    RateLimitReached,
}

impl error::Error for RoutingError {}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoutingError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            RoutingError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            RoutingError::InvalidStatus { status, message } => match message {
                Some(text) => write!(f, "Lookup failed ({}): {}", status, text),
                None => write!(f, "Lookup failed ({})", status),
            },
            RoutingError::NoRoute => write!(f, "No route between the points."),
            RoutingError::Timeout => write!(f, "Request timed out."),
            RoutingError::RateLimitReached => write!(f, "Rate limit reached."),
        }
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RoutingError::Timeout
        } else {
            RoutingError::RequestError(Arc::new(e))
        }
    }
}

impl From<serde_json::Error> for RoutingError {
    fn from(e: serde_json::Error) -> Self {
        RoutingError::JsonError(Arc::new(e))
    }
}

impl From<tokio::time::error::Elapsed> for RoutingError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        RoutingError::Timeout
    }
}
